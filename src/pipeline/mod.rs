//! Complaint Analysis Pipeline
//!
//! ```text
//! STAGE 1: Mask       raw text      -> safe text        (fallback: raw text)
//! STAGE 2: Triage     safe text     -> category/urgency (fallback: MANUAL_REVIEW / MEDIUM)
//! STAGE 3: Retrieve   safe text     -> snippets         (fallback: none)
//! STAGE 4: Generate   all of above  -> plan + reply     (fallback: system error plan)
//! STAGE 5: Persist    one create per run, status ANALYZED
//! ```
//!
//! Every stage failure is replaced by a well-formed fallback so the next
//! stage always receives valid input. The only errors surfaced to callers
//! are store failures and, in strict masking mode, an unavailable masker.

mod orchestrator;
mod outcome;
pub mod fallback;

pub use orchestrator::{PipelineError, PipelineOrchestrator};
pub use outcome::StageOutcome;
pub use crate::config::MaskingPolicy;
