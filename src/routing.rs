//! Defines the routes of the application and how each route is handled.

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    AppState,
    ai::analyze_transactions,
    analytics::get_analytics,
    auth::{get_me, log_in, register},
    endpoints,
    transaction::{export_transactions, get_transactions, upload_transactions},
};

/// Return a router with all the app's routes.
///
/// Routes that take a [crate::auth::Claims] argument require a valid bearer
/// token; the rest are public.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::REGISTER, post(register))
        .route(endpoints::LOG_IN, post(log_in))
        .route(endpoints::ME, get(get_me))
        .route(endpoints::UPLOAD_TRANSACTIONS, post(upload_transactions))
        .route(endpoints::TRANSACTIONS, get(get_transactions))
        .route(endpoints::EXPORT_TRANSACTIONS, get(export_transactions))
        .route(endpoints::ANALYTICS, get(get_analytics))
        .route(endpoints::AI_ANALYZE, post(analyze_transactions))
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> StatusCode {
    StatusCode::IM_A_TEAPOT
}
