//! ComplaintOps: customer complaint analysis pipeline
//!
//! Every complaint passes through four remote AI stages, then is persisted:
//!
//! - **Masking**: PII redaction; downstream stages only see the masked text
//! - **Triage**: category and urgency labels
//! - **Retrieval**: knowledge-base snippets for the reply
//! - **Generation**: action plan and customer reply draft
//!
//! Any stage may fail; the orchestrator substitutes a safe fallback and always
//! stores a complete record (see [`pipeline::fallback`]).

pub mod api;
pub mod config;
pub mod pipeline;
pub mod stages;
pub mod storage;
pub mod types;

pub use config::{AppConfig, MaskingPolicy};
pub use pipeline::{PipelineError, PipelineOrchestrator};
pub use stages::{Stage, StageClients, StageError};
pub use storage::{InMemoryRecordStore, RecordStore, SledRecordStore, StoreError};
pub use types::{ComplaintRecord, ComplaintStatus};
