//! The endpoint for bulk-uploading transaction records.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, Error, auth::Claims};

use super::{models::TransactionUpload, store::create_transactions};

/// Handle a bulk upload of transaction records for the authenticated user.
///
/// The body must be a JSON array of records. The whole batch is stored
/// atomically; a single bad record rejects the upload without storing
/// anything.
///
/// # Panics
/// Panics if the database lock is poisoned.
///
/// # Errors
/// Returns an [Error::InvalidUpload] if the body is not an array of valid
/// records, or an [Error::SqlError] if the insert failed.
pub async fn upload_transactions(
    State(state): State<AppState>,
    claims: Claims,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, Error> {
    if !body.is_array() {
        return Err(Error::InvalidUpload(
            "expected a JSON array of transactions".to_string(),
        ));
    }

    let records: Vec<TransactionUpload> =
        serde_json::from_value(body).map_err(|error| Error::InvalidUpload(error.to_string()))?;

    let mut connection = state.db_connection.lock().unwrap();
    let count = create_transactions(&records, claims.user_id(), &mut connection)?;

    tracing::info!("uploaded {count} transactions for user {}", claims.user_id());

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Transactions uploaded successfully", "count": count})),
    )
        .into_response())
}
