//! Complaint record types: ComplaintRecord, NewComplaint, ComplaintStatus

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Status
// ============================================================================

/// Lifecycle status of a complaint.
///
/// The pipeline only ever writes `Analyzed`. `Resolved` exists for the
/// human review workflow and is never set by this crate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    /// Received, not yet run through the pipeline
    #[default]
    New,
    /// All four stages resolved (genuinely or by fallback) and persisted
    Analyzed,
    /// Closed by an operator
    Resolved,
}

impl ComplaintStatus {
    /// Wire/storage code
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::New => "NEW",
            ComplaintStatus::Analyzed => "ANALYZED",
            ComplaintStatus::Resolved => "RESOLVED",
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Records
// ============================================================================

/// A complaint that has been persisted and carries a store-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintRecord {
    /// Assigned by the record store on create, immutable thereafter
    pub id: u64,
    /// Raw complaint text as received
    pub original_text: String,
    /// Text after PII masking (equals `original_text` when masking fell back)
    pub masked_text: String,
    /// Triage category or the `MANUAL_REVIEW` sentinel
    pub category: String,
    /// Triage urgency or the `MEDIUM` default
    pub urgency: String,
    /// JSON array of instruction strings
    pub action_plan: String,
    /// Draft reply for the customer (or the generation error placeholder)
    pub customer_reply_draft: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

impl ComplaintRecord {
    /// Parse the stored action plan back into its ordered instructions.
    ///
    /// Plans that are not a JSON string array are returned as a single item.
    pub fn action_plan_items(&self) -> Vec<String> {
        serde_json::from_str::<Vec<String>>(&self.action_plan)
            .unwrap_or_else(|_| vec![self.action_plan.clone()])
    }
}

/// A fully analyzed complaint that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComplaint {
    pub original_text: String,
    pub masked_text: String,
    pub category: String,
    pub urgency: String,
    pub action_plan: String,
    pub customer_reply_draft: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

impl NewComplaint {
    /// Attach the store-assigned id.
    pub fn into_record(self, id: u64) -> ComplaintRecord {
        ComplaintRecord {
            id,
            original_text: self.original_text,
            masked_text: self.masked_text,
            category: self.category,
            urgency: self.urgency,
            action_plan: self.action_plan,
            customer_reply_draft: self.customer_reply_draft,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Serialize an action plan to its stored textual form (a JSON array).
pub fn serialize_action_plan(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| format!("{items:?}"))
}
