//! The endpoints for viewing and exporting transactions.

use axum::{
    Json,
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    auth::Claims,
    pipeline::{self, ViewParams, export::to_csv, filter::filter, sort::sort},
};

use super::{models::Transaction, store::get_transactions_for_user};

/// One page of a user's transactions along with paging bookkeeping.
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    /// The transactions on the requested page.
    pub transactions: Vec<Transaction>,
    /// The 1-based page number that was served.
    pub page: u64,
    /// How many pages the filtered set divides into.
    pub total_pages: u64,
}

/// Handle a request for a filtered, sorted, paginated view of the
/// authenticated user's transactions.
///
/// # Panics
/// Panics if the database lock is poisoned.
pub async fn get_transactions(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<ViewParams>,
) -> Result<Json<TransactionsResponse>, Error> {
    let snapshot = {
        let connection = state.db_connection.lock().unwrap();
        get_transactions_for_user(claims.user_id(), &connection)?
    };

    let page = pipeline::run(&snapshot, &params);

    Ok(Json(TransactionsResponse {
        transactions: page.records,
        page: page.page,
        total_pages: page.total_pages,
    }))
}

/// Handle a request to download the authenticated user's filtered
/// transactions as a CSV attachment.
///
/// The export covers the whole filtered set in sorted order, not just one
/// page.
///
/// # Panics
/// Panics if the database lock is poisoned.
pub async fn export_transactions(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<ViewParams>,
) -> Result<Response, Error> {
    let snapshot = {
        let connection = state.db_connection.lock().unwrap();
        get_transactions_for_user(claims.user_id(), &connection)?
    };

    let filtered = filter(&snapshot, &params);
    let sorted = sort(filtered, params.sort_field, params.sort_order);
    let csv_text = to_csv(&sorted)?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.csv\"",
            ),
        ],
        csv_text,
    )
        .into_response())
}
