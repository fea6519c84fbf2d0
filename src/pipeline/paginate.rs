//! Pagination stage: slice an ordered sequence into fixed-size pages.

/// The number of records in a full page.
pub const PAGE_SIZE: usize = 10;

/// One page of records along with the paging bookkeeping clients need to
/// render page controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The records on this page, in the order they appeared in the input.
    pub records: Vec<T>,
    /// The 1-based number of this page.
    pub page: u64,
    /// The total number of pages the input divides into. Zero when the input
    /// is empty.
    pub total_pages: u64,
}

/// Take the `page`-th page of `records`, `page_size` records per page.
///
/// Page numbers are 1-based; zero is treated as page one. A page past the end
/// of the input yields an empty page rather than an error, so a client whose
/// filter change shrank the result set simply sees no rows until it resets
/// its page number.
pub fn paginate<T: Clone>(records: &[T], page: u64, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let start = (page as usize - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(records.len());

    let page_records = if start < records.len() {
        records[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        records: page_records,
        page,
        total_pages: records.len().div_ceil(page_size) as u64,
    }
}
