//! # REST API
//!
//! HTTP surface of the RFQ engine: handlers, wire DTOs, and router.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
