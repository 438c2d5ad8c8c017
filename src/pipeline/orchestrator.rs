//! Pipeline Orchestrator - sequential four-stage complaint analysis
//!
//! Each stage receives the *safe* output of the previous one (a genuine
//! result or its fallback), never a raw error. The record is written once,
//! after all four stages have resolved.

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::fallback;
use super::outcome::StageOutcome;
use crate::config::MaskingPolicy;
use crate::stages::{invoke, StageClients, StageError};
use crate::storage::{RecordStore, StoreError};
use crate::types::{
    serialize_action_plan, ComplaintRecord, ComplaintStatus, GenerationRequest, MaskingRequest,
    MaskingResponse, NewComplaint, RetrievalRequest, TriageRequest,
};

/// Errors surfaced by `analyze`. Stage failures are not among them unless
/// strict masking is enabled.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("masking stage unavailable and strict masking is enabled: {0}")]
    MaskingUnavailable(StageError),
    #[error("failed to persist complaint: {0}")]
    Store(#[from] StoreError),
}

/// Drives a complaint through mask → triage → retrieve → generate → persist.
///
/// Holds only immutable collaborators; share it behind `Arc` and call
/// `analyze` concurrently.
pub struct PipelineOrchestrator {
    stages: StageClients,
    store: Arc<dyn RecordStore>,
    masking_policy: MaskingPolicy,
}

impl PipelineOrchestrator {
    pub fn new(stages: StageClients, store: Arc<dyn RecordStore>) -> Self {
        Self {
            stages,
            store,
            masking_policy: MaskingPolicy::default(),
        }
    }

    pub fn with_masking_policy(mut self, policy: MaskingPolicy) -> Self {
        self.masking_policy = policy;
        self
    }

    pub fn masking_policy(&self) -> MaskingPolicy {
        self.masking_policy
    }

    /// The store records are written to
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Analyze one complaint and persist the result.
    ///
    /// Always yields an ANALYZED record when the AI service is down; check
    /// for the sentinel values in `pipeline::fallback` to detect degraded runs.
    pub async fn analyze(&self, raw_text: &str) -> Result<ComplaintRecord, PipelineError> {
        let started = Instant::now();
        debug!(text_len = raw_text.len(), "Analysis started");

        // STAGE 1: Mask
        let masking = self.mask(raw_text).await?;
        let safe_text = masking.value().masked_text.clone();
        if !masking.is_fallback() {
            debug!(entities = ?masking.value().masked_entities, "Stage 1: masking complete");
        }

        // STAGE 2: Triage
        let triage = StageOutcome::resolve(
            self.stages.triage.name(),
            invoke(
                self.stages.triage.as_ref(),
                &TriageRequest { text: safe_text.clone() },
            )
            .await,
            fallback::triage,
        );
        debug!(
            category = %triage.value().category,
            urgency = %triage.value().urgency,
            "Stage 2: triage resolved"
        );

        // STAGE 3: Retrieve
        let retrieval = StageOutcome::resolve(
            self.stages.retrieval.name(),
            invoke(
                self.stages.retrieval.as_ref(),
                &RetrievalRequest { text: safe_text.clone() },
            )
            .await,
            fallback::retrieval,
        );
        debug!(
            snippets = retrieval.value().relevant_snippets.len(),
            "Stage 3: retrieval resolved"
        );

        // STAGE 4: Generate
        let generation_request = GenerationRequest {
            text: safe_text.clone(),
            category: triage.value().category.clone(),
            urgency: triage.value().urgency.clone(),
            relevant_snippets: retrieval.value().relevant_snippets.clone(),
        };
        let generation = StageOutcome::resolve(
            self.stages.generation.name(),
            invoke(self.stages.generation.as_ref(), &generation_request).await,
            fallback::generation,
        );
        if !generation.value().risk_flags.is_empty() {
            debug!(
                risk_flags = ?generation.value().risk_flags,
                "Stage 4: generation raised risk flags"
            );
        }

        let degraded: Vec<&str> = [
            ("masking", masking.is_fallback()),
            ("triage", triage.is_fallback()),
            ("retrieval", retrieval.is_fallback()),
            ("generation", generation.is_fallback()),
        ]
        .into_iter()
        .filter_map(|(name, fell_back)| fell_back.then_some(name))
        .collect();

        // STAGE 5: Persist
        let triage = triage.into_inner();
        let generation = generation.into_inner();
        let complaint = NewComplaint {
            original_text: raw_text.to_string(),
            masked_text: safe_text,
            category: triage.category,
            urgency: triage.urgency,
            action_plan: serialize_action_plan(&generation.action_plan),
            customer_reply_draft: generation.customer_reply_draft,
            status: ComplaintStatus::Analyzed,
            created_at: Utc::now(),
        };

        let record = self.store.create(complaint).map_err(|e| {
            error!(
                error = %e,
                store = self.store.backend_name(),
                "Failed to persist analyzed complaint"
            );
            PipelineError::Store(e)
        })?;

        info!(
            id = record.id,
            category = %record.category,
            urgency = %record.urgency,
            degraded = ?degraded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Complaint analyzed"
        );

        Ok(record)
    }

    /// Stage 1 with the masking policy applied.
    ///
    /// Empty input has nothing to redact and skips the stage, so strict mode
    /// does not mistake the empty masked text for an outage.
    async fn mask(&self, raw_text: &str) -> Result<StageOutcome<MaskingResponse>, PipelineError> {
        if raw_text.is_empty() {
            return Ok(StageOutcome::Completed(MaskingResponse {
                masked_text: String::new(),
                masked_entities: Vec::new(),
                original_text: None,
            }));
        }

        let request = MaskingRequest { text: raw_text.to_string() };

        match invoke(self.stages.masking.as_ref(), &request).await {
            Ok(resp) => Ok(StageOutcome::Completed(resp)),
            Err(e) if self.masking_policy == MaskingPolicy::Strict => {
                error!(
                    stage = self.stages.masking.name(),
                    error = %e,
                    "Masking failed, strict policy refuses to continue"
                );
                Err(PipelineError::MaskingUnavailable(e))
            }
            Err(e) => {
                warn!(
                    stage = self.stages.masking.name(),
                    error = %e,
                    "Masking failed, continuing with UNMASKED text"
                );
                Ok(StageOutcome::Fallback(fallback::masking(raw_text, &e)))
            }
        }
    }
}
