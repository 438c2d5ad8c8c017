//! Fallback values substituted when a stage call fails
//!
//! Each function maps a stage failure to the output the next stage will see.
//! The sentinel strings are part of the record contract: callers detect
//! degraded runs by looking for them.

use crate::stages::StageError;
use crate::types::{GenerationResponse, MaskingResponse, RetrievalResponse, TriageResponse};

/// Category forcing a human to look at the complaint.
pub const MANUAL_REVIEW_CATEGORY: &str = "MANUAL_REVIEW";

/// Urgency used when triage is unavailable.
pub const FALLBACK_URGENCY: &str = "MEDIUM";

/// Single action plan entry written when generation fails.
pub const GENERATION_FAILED_ACTION: &str =
    "System Error: AI Generation Failed. Please review manually.";

/// Reply draft written when generation fails.
pub const GENERATION_FAILED_REPLY: &str = "Error generating draft.";

/// Masking unavailable: proceed with the raw text and no masked entities.
///
/// The raw text, PII included, flows to every downstream stage and into the
/// stored `masked_text`. `MaskingPolicy::Strict` disables this path.
pub fn masking(raw_text: &str, _error: &StageError) -> MaskingResponse {
    MaskingResponse {
        masked_text: raw_text.to_string(),
        masked_entities: Vec::new(),
        original_text: None,
    }
}

pub fn triage(_error: &StageError) -> TriageResponse {
    TriageResponse {
        category: MANUAL_REVIEW_CATEGORY.to_string(),
        category_confidence: 0.0,
        urgency: FALLBACK_URGENCY.to_string(),
        urgency_confidence: 0.0,
    }
}

pub fn retrieval(_error: &StageError) -> RetrievalResponse {
    RetrievalResponse::default()
}

pub fn generation(_error: &StageError) -> GenerationResponse {
    GenerationResponse {
        action_plan: vec![GENERATION_FAILED_ACTION.to_string()],
        customer_reply_draft: GENERATION_FAILED_REPLY.to_string(),
        risk_flags: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::StagePayload;

    fn err() -> StageError {
        StageError::Status(503)
    }

    #[test]
    fn test_masking_fallback_is_raw_text() {
        let resp = masking("Call me on 555-0100", &err());
        assert_eq!(resp.masked_text, "Call me on 555-0100");
        assert!(resp.masked_entities.is_empty());
    }

    #[test]
    fn test_triage_fallback_forces_manual_review() {
        let resp = triage(&err());
        assert_eq!(resp.category, "MANUAL_REVIEW");
        assert_eq!(resp.urgency, "MEDIUM");
    }

    #[test]
    fn test_generation_fallback() {
        let resp = generation(&StageError::Transport("connection refused".to_string()));
        assert_eq!(
            resp.action_plan,
            vec!["System Error: AI Generation Failed. Please review manually."]
        );
        assert_eq!(resp.customer_reply_draft, "Error generating draft.");
    }

    #[test]
    fn test_fallbacks_satisfy_payload_contracts() {
        assert!(triage(&err()).validate().is_ok());
        assert!(retrieval(&err()).validate().is_ok());
        assert!(generation(&err()).validate().is_ok());
        assert!(retrieval(&err()).relevant_snippets.is_empty());
    }
}
