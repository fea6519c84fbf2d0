//! Penta is a web app for analyzing personal finances.
//!
//! This library provides a JSON REST API: user registration and bearer-token
//! authentication, bulk transaction upload, a filtering/sorting/aggregation
//! pipeline over each user's transactions, CSV export, and a proxy endpoint
//! that forwards transaction samples to a chat-completions API for analysis.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod ai;
mod analytics;
mod app_state;
mod auth;
mod db;
mod endpoints;
mod password;
pub mod pipeline;
mod routing;
pub mod transaction;
mod user;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use password::PasswordHash;
pub use routing::build_router;
pub use user::{User, UserID};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email used to register already belongs to a user.
    #[error("a user with this email already exists")]
    DuplicateEmail,

    /// The requested resource does not exist.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The uploaded transaction data was not a JSON array of valid records.
    ///
    /// The error string describes what failed to parse.
    #[error("invalid upload format: {0}")]
    InvalidUpload(String),

    /// The analysis request was missing a question or transaction data.
    #[error("invalid analysis request: {0}")]
    InvalidAnalysisRequest(&'static str),

    /// The AI analysis endpoint has no API key configured.
    #[error("AI analysis is not configured on this server")]
    AnalysisUnavailable,

    /// The upstream completion API call failed or returned a malformed body.
    ///
    /// The error string should only be logged on the server, not sent to the
    /// client.
    #[error("AI analysis failed: {0}")]
    AnalysisFailed(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged on the server, not sent to the
    /// client.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The CSV export could not be rendered.
    #[error("could not render export: {0}")]
    ExportError(String),

    /// Wrapper for SQLite errors not handled by the other enum entries.
    #[error("an SQL related error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Error::DuplicateEmail => (StatusCode::BAD_REQUEST, "User already exists".to_string()),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "The requested resource could not be found".to_string(),
            ),
            Error::InvalidUpload(description) => (StatusCode::BAD_REQUEST, description),
            Error::InvalidAnalysisRequest(description) => {
                (StatusCode::BAD_REQUEST, description.to_string())
            }
            Error::AnalysisUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "AI analysis is not configured".to_string(),
            ),
            Error::AnalysisFailed(description) => {
                tracing::error!("AI analysis failed: {description}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI analysis failed".to_string(),
                )
            }
            Error::HashingError(description) => {
                tracing::error!("hashing error: {description}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Error::ExportError(description) => {
                tracing::error!("export error: {description}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Error::SqlError(sql_error) => {
                tracing::error!("SQL error: {sql_error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));

        (status, body).into_response()
    }
}
