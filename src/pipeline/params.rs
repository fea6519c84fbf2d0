//! The caller-supplied parameters for a pipeline run.

use serde::Deserialize;

/// The wildcard value that disables the category or status constraint.
pub const MATCH_ALL: &str = "all";

/// The transaction field to order a filtered sequence by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Order by calendar date.
    #[default]
    Date,
    /// Order by amount, numerically.
    Amount,
    /// Order by category label.
    Category,
    /// Order by status label.
    Status,
}

/// The direction to sort in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Asc,
    /// Sort in order of decreasing value.
    #[default]
    Desc,
}

/// Filter, sort, and paging options for one pipeline run.
///
/// Every field has a "no constraint" default, so a request with no query
/// parameters returns the newest page of everything. Date bounds are carried
/// as raw strings and parsed leniently at filter time: a malformed bound
/// degrades to "no bound" rather than failing the request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewParams {
    /// Exact category to keep, or [MATCH_ALL].
    pub category: String,
    /// Exact status to keep, or [MATCH_ALL].
    pub status: String,
    /// Inclusive lower date bound as an ISO 8601 string.
    pub date_from: Option<String>,
    /// Inclusive upper date bound as an ISO 8601 string.
    pub date_to: Option<String>,
    /// Case-insensitive free-text search over category, status, and date.
    pub search: String,
    /// The field to sort by.
    pub sort_field: SortField,
    /// The direction to sort in.
    pub sort_order: SortOrder,
    /// The 1-based page number. Clients reset this to 1 whenever a filter
    /// changes; an out-of-range page yields an empty page, never an error.
    pub page: u64,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            category: MATCH_ALL.to_string(),
            status: MATCH_ALL.to_string(),
            date_from: None,
            date_to: None,
            search: String::new(),
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            page: 1,
        }
    }
}
