//! API route definitions
//!
//! - /api/analyze - submit a complaint
//! - /api/complaints - list stored complaints
//! - /api/complaints/:id - one stored complaint
//! - /health - liveness

use axum::{routing::{get, post}, Router};

use super::handlers::{self, ApiState};

/// Complaint endpoints, nested under `/api`
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/complaints", get(handlers::list_complaints))
        .route("/complaints/:id", get(handlers::get_complaint))
        .with_state(state)
}

/// Health endpoint at root level
pub fn health_routes(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
