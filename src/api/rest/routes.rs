//! # REST Routes
//!
//! Router assembly for the RFQ API.

use crate::api::rest::handlers::{
    AppState, health, retrieve_rfq_result, retrieve_rfq_status, submit_rfq,
};
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// Requests are traced at the HTTP layer; CORS is permissive, matching a
/// service that sits behind its own gateway.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/user/submit-rfq", post(submit_rfq))
        .route("/api/user/retrieve-rfq-status", get(retrieve_rfq_status))
        .route("/api/user/retrieve-rfq-result", get(retrieve_rfq_result))
        .route("/api/v1/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
