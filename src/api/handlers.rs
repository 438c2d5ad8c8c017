//! API route handlers
//!
//! - `POST /api/analyze`: run the pipeline on one complaint
//! - `GET /api/complaints`: list stored complaints
//! - `GET /api/complaints/:id`: fetch one complaint
//! - `GET /health`: liveness and store backend

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::envelope::ApiErrorResponse;
use crate::pipeline::{PipelineError, PipelineOrchestrator};
use crate::storage::{RecordStore, StoreError};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    /// Analysis pipeline
    pub orchestrator: Arc<PipelineOrchestrator>,
    /// Record store, the same one the orchestrator writes to
    pub store: Arc<dyn RecordStore>,
}

impl ApiState {
    pub fn new(orchestrator: Arc<PipelineOrchestrator>) -> Self {
        let store = Arc::clone(orchestrator.store());
        Self { orchestrator, store }
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Body of `POST /api/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Submit a complaint for analysis.
///
/// Stage outages never fail the request; only a blank body, a strict-mode
/// masking outage, or a store failure do.
pub async fn analyze(State(state): State<ApiState>, Json(req): Json<AnalyzeRequest>) -> Response {
    if req.text.trim().is_empty() {
        return ApiErrorResponse::bad_request("Complaint text must not be blank");
    }

    match state.orchestrator.analyze(&req.text).await {
        Ok(record) => Json(record).into_response(),
        Err(PipelineError::MaskingUnavailable(e)) => {
            ApiErrorResponse::service_unavailable(format!("Masking service unavailable: {e}"))
        }
        Err(PipelineError::Store(e)) => {
            tracing::error!(error = %e, "Analyze request failed to persist");
            ApiErrorResponse::internal("Failed to store complaint")
        }
    }
}

// ============================================================================
// Complaint Lookup
// ============================================================================

pub async fn list_complaints(State(state): State<ApiState>) -> Response {
    match state.store.find_all() {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list complaints");
            ApiErrorResponse::internal("Failed to read complaints")
        }
    }
}

pub async fn get_complaint(State(state): State<ApiState>, Path(id): Path<u64>) -> Response {
    match state.store.find_by_id(id) {
        Ok(record) => Json(record).into_response(),
        Err(e @ StoreError::NotFound(_)) => ApiErrorResponse::not_found(e.to_string()),
        Err(e) => {
            tracing::error!(id, error = %e, "Failed to read complaint");
            ApiErrorResponse::internal("Failed to read complaint")
        }
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub version: &'static str,
}

pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        store: state.store.backend_name(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
