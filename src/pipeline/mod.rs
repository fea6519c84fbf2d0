//! The transaction view pipeline.
//!
//! The pipeline turns a user's full transaction snapshot into the data a
//! dashboard renders: filter by the caller's criteria, sort by one field,
//! then slice into pages. Each stage is a pure function over its input, so
//! running the same snapshot through the same parameters twice yields the
//! same result. The [aggregate] and [export] stages consume the filtered
//! sequence directly, bypassing pagination.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod paginate;
pub mod params;
pub mod sort;

pub use paginate::{PAGE_SIZE, Page};
pub use params::ViewParams;

use crate::transaction::Transaction;

/// Run the filter, sort, and paginate stages over `snapshot`.
pub fn run(snapshot: &[Transaction], params: &ViewParams) -> Page<Transaction> {
    let filtered = filter::filter(snapshot, params);
    let sorted = sort::sort(filtered, params.sort_field, params.sort_order);

    paginate::paginate(&sorted, params.page, PAGE_SIZE)
}
