//! The endpoint serving aggregated analytics for a user's transactions.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    auth::Claims,
    pipeline::{
        ViewParams,
        aggregate::{
            LabelledTotal, MonthlyBucket, StatusTotals, TOP_CONTRIBUTOR_LIMIT, Totals,
            category_totals, label_totals, monthly_buckets, status_totals, top_contributors,
            totals,
        },
        filter::filter,
    },
    transaction::get_transactions_for_user,
};

/// Every aggregation the dashboard charts are drawn from, computed over the
/// same filtered transaction set in a single request.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    /// The headline income, expense, balance, and savings figures.
    pub totals: Totals,
    /// The per-month revenue, expense, paid, and pending sums.
    pub monthly: Vec<MonthlyBucket>,
    /// The summed amount per category.
    pub category_totals: Vec<LabelledTotal>,
    /// The summed amount per category and status pair.
    pub label_totals: Vec<LabelledTotal>,
    /// The paid versus pending split.
    pub status_totals: StatusTotals,
    /// The contributors with the largest summed amounts.
    pub top_contributors: Vec<LabelledTotal>,
}

/// Handle a request for the authenticated user's transaction analytics.
///
/// The same filter parameters as the transaction list apply, so the charts
/// and the table a client renders always describe the same set of records.
///
/// # Panics
/// Panics if the database lock is poisoned.
pub async fn get_analytics(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<ViewParams>,
) -> Result<Json<AnalyticsResponse>, Error> {
    let snapshot = {
        let connection = state.db_connection.lock().unwrap();
        get_transactions_for_user(claims.user_id(), &connection)?
    };

    let filtered = filter(&snapshot, &params);

    Ok(Json(AnalyticsResponse {
        totals: totals(&filtered),
        monthly: monthly_buckets(&filtered),
        category_totals: category_totals(&filtered),
        label_totals: label_totals(&filtered),
        status_totals: status_totals(&filtered),
        top_contributors: top_contributors(&filtered, TOP_CONTRIBUTOR_LIMIT),
    }))
}
