//! Stage payloads exchanged with the AI service
//!
//! Field names are snake_case on the wire. List fields that the service
//! omits deserialize as empty.

use serde::{Deserialize, Serialize};

// ============================================================================
// Masking (/mask)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaskingRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaskingResponse {
    pub masked_text: String,
    #[serde(default)]
    pub masked_entities: Vec<String>,
    /// Echoed only when the service runs in debug mode; never used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

// ============================================================================
// Triage (/predict)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriageRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageResponse {
    pub category: String,
    #[serde(default)]
    pub category_confidence: f64,
    pub urgency: String,
    #[serde(default)]
    pub urgency_confidence: f64,
}

// ============================================================================
// Retrieval (/retrieve)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrievalRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RetrievalResponse {
    #[serde(default)]
    pub relevant_snippets: Vec<String>,
}

// ============================================================================
// Generation (/generate)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationRequest {
    pub text: String,
    pub category: String,
    pub urgency: String,
    pub relevant_snippets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationResponse {
    #[serde(default)]
    pub action_plan: Vec<String>,
    pub customer_reply_draft: String,
    #[serde(default)]
    pub risk_flags: Vec<String>,
}
