//! Stage Clients — typed calls to the remote AI service
//!
//! Each pipeline stage (masking, triage, retrieval, generation) is reached
//! through the same [`Stage`] trait: one request payload in, one response
//! payload or a [`StageError`] out. Implementations:
//!
//! - [`HttpStage`]: single JSON POST against `{base_url}{path}` (production)
//! - Test doubles implement the trait directly
//!
//! A stage never returns a partially populated success value; a response that
//! decodes but breaks its payload contract is reported as
//! [`StageError::Malformed`] by [`invoke`].

mod http;

pub use http::{HttpStage, GENERATE_PATH, MASK_PATH, PREDICT_PATH, RETRIEVE_PATH};

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::StagesConfig;
use crate::types::{
    GenerationRequest, GenerationResponse, MaskingRequest, MaskingResponse, RetrievalRequest,
    RetrievalResponse, TriageRequest, TriageResponse,
};

/// Failure of a single stage call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("stage returned status {0}")]
    Status(u16),
    #[error("undecodable response: {0}")]
    Decode(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for StageError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            StageError::Status(status.as_u16())
        } else if err.is_decode() {
            StageError::Decode(err.to_string())
        } else {
            StageError::Transport(err.to_string())
        }
    }
}

/// Contract check applied to every stage response before it is used.
pub trait StagePayload {
    fn validate(&self) -> Result<(), String>;
}

impl StagePayload for MaskingResponse {
    fn validate(&self) -> Result<(), String> {
        if self.masked_text.is_empty() {
            return Err("masked_text is empty".to_string());
        }
        Ok(())
    }
}

impl StagePayload for TriageResponse {
    fn validate(&self) -> Result<(), String> {
        if self.category.trim().is_empty() {
            return Err("category is blank".to_string());
        }
        if self.urgency.trim().is_empty() {
            return Err("urgency is blank".to_string());
        }
        Ok(())
    }
}

impl StagePayload for RetrievalResponse {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl StagePayload for GenerationResponse {
    fn validate(&self) -> Result<(), String> {
        if self.action_plan.is_empty() {
            return Err("action_plan is empty".to_string());
        }
        if self.customer_reply_draft.trim().is_empty() {
            return Err("customer_reply_draft is blank".to_string());
        }
        Ok(())
    }
}

/// One remote analysis step
///
/// Implementations must be thread-safe (Send + Sync); the orchestrator is
/// shared across concurrent requests.
#[async_trait]
pub trait Stage: Send + Sync {
    type Request: Serialize + Send + Sync;
    type Response: StagePayload + Send;

    /// Stage name for logging
    fn name(&self) -> &'static str;

    /// Perform one round trip. No retries.
    async fn call(&self, request: &Self::Request) -> Result<Self::Response, StageError>;
}

pub type MaskingStage = dyn Stage<Request = MaskingRequest, Response = MaskingResponse>;
pub type TriageStage = dyn Stage<Request = TriageRequest, Response = TriageResponse>;
pub type RetrievalStage = dyn Stage<Request = RetrievalRequest, Response = RetrievalResponse>;
pub type GenerationStage = dyn Stage<Request = GenerationRequest, Response = GenerationResponse>;

/// Call a stage and enforce its payload contract.
pub async fn invoke<S>(stage: &S, request: &S::Request) -> Result<S::Response, StageError>
where
    S: Stage + ?Sized,
{
    let response = stage.call(request).await?;
    response.validate().map_err(StageError::Malformed)?;
    Ok(response)
}

/// The four stage clients the orchestrator needs
#[derive(Clone)]
pub struct StageClients {
    pub masking: Arc<MaskingStage>,
    pub triage: Arc<TriageStage>,
    pub retrieval: Arc<RetrievalStage>,
    pub generation: Arc<GenerationStage>,
}

impl StageClients {
    /// Build HTTP clients for all four stages against one AI service.
    ///
    /// The stages share one connection pool. Without `request_timeout_secs`
    /// the transport default applies.
    pub fn from_config(config: &StagesConfig) -> Result<Self, StageError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;
        let base_url = config.base_url.trim_end_matches('/');

        tracing::info!(
            base_url = %base_url,
            timeout_secs = ?config.request_timeout_secs,
            "Stage clients configured"
        );

        Ok(Self {
            masking: Arc::new(HttpStage::new(http.clone(), base_url, MASK_PATH, "masking")),
            triage: Arc::new(HttpStage::new(http.clone(), base_url, PREDICT_PATH, "triage")),
            retrieval: Arc::new(HttpStage::new(http.clone(), base_url, RETRIEVE_PATH, "retrieval")),
            generation: Arc::new(HttpStage::new(http, base_url, GENERATE_PATH, "generation")),
        })
    }
}
