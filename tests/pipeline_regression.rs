//! Pipeline Regression Tests
//!
//! Drive `PipelineOrchestrator` over real HTTP against an in-process fake AI
//! service, persisting into a sled store in a temp directory.

mod common;

use complaint_ops::config::{MaskingPolicy, StagesConfig};
use complaint_ops::pipeline::{fallback, PipelineError, PipelineOrchestrator};
use complaint_ops::stages::StageClients;
use complaint_ops::storage::{RecordStore, SledRecordStore};
use complaint_ops::types::ComplaintStatus;

use common::{spawn_ai_service, unreachable_url, Outages, Recorded};
use std::sync::Arc;

const RAW: &str = "My order #123 never arrived";

fn orchestrator(base_url: &str, store: Arc<dyn RecordStore>) -> PipelineOrchestrator {
    let stages = StageClients::from_config(&StagesConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: Some(5),
    })
    .unwrap();
    PipelineOrchestrator::new(stages, store)
}

#[tokio::test]
async fn test_end_to_end_over_http() {
    let recorded = Recorded::default();
    let base = spawn_ai_service(Outages::default(), recorded.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn RecordStore> = Arc::new(SledRecordStore::open(dir.path()).unwrap());

    let record = orchestrator(&base, Arc::clone(&store)).analyze(RAW).await.unwrap();

    assert_eq!(record.status, ComplaintStatus::Analyzed);
    assert_eq!(record.original_text, RAW);
    assert_eq!(record.masked_text, "My order #[ORDER_ID] never arrived");
    assert_eq!(record.category, "SHIPPING");
    assert_eq!(record.urgency, "HIGH");
    let plan = record.action_plan_items();
    assert!(plan.contains(&"Issue refund".to_string()));
    assert!(plan.contains(&"Apologize".to_string()));

    // Only the masked text left the service boundary after stage 1
    for path in ["/predict", "/retrieve", "/generate"] {
        let bodies = recorded.bodies(path);
        assert_eq!(bodies.len(), 1, "{path} called once");
        assert_eq!(bodies[0]["text"], "My order #[ORDER_ID] never arrived");
    }
    let gen = &recorded.bodies("/generate")[0];
    assert_eq!(gen["category"], "SHIPPING");
    assert_eq!(gen["urgency"], "HIGH");
    assert_eq!(gen["relevant_snippets"][0], "Lost parcels are refunded after 14 days.");

    assert_eq!(store.find_by_id(record.id).unwrap(), record);
}

#[tokio::test]
async fn test_ai_service_unreachable_still_stores_record() {
    let base = unreachable_url().await;
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn RecordStore> = Arc::new(SledRecordStore::open(dir.path()).unwrap());

    let record = orchestrator(&base, Arc::clone(&store)).analyze(RAW).await.unwrap();

    assert_eq!(record.status, ComplaintStatus::Analyzed);
    assert_eq!(record.masked_text, RAW);
    assert_eq!(record.category, fallback::MANUAL_REVIEW_CATEGORY);
    assert_eq!(record.urgency, fallback::FALLBACK_URGENCY);
    assert_eq!(record.action_plan_items(), vec![fallback::GENERATION_FAILED_ACTION]);
    assert_eq!(record.customer_reply_draft, fallback::GENERATION_FAILED_REPLY);
    assert_eq!(store.find_all().unwrap().len(), 1);
}

#[tokio::test]
async fn test_retrieval_outage_sends_empty_snippets() {
    let recorded = Recorded::default();
    let outages = Outages { retrieve: true, ..Outages::default() };
    let base = spawn_ai_service(outages, recorded.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn RecordStore> = Arc::new(SledRecordStore::open(dir.path()).unwrap());

    let record = orchestrator(&base, store).analyze(RAW).await.unwrap();

    assert_eq!(record.category, "SHIPPING");
    let gen = &recorded.bodies("/generate")[0];
    assert_eq!(gen["relevant_snippets"], serde_json::json!([]));
}

#[tokio::test]
async fn test_masking_outage_permissive_vs_strict() {
    let outages = Outages { mask: true, ..Outages::default() };

    let recorded = Recorded::default();
    let base = spawn_ai_service(outages, recorded.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn RecordStore> = Arc::new(SledRecordStore::open(dir.path()).unwrap());

    let record = orchestrator(&base, Arc::clone(&store)).analyze(RAW).await.unwrap();
    assert_eq!(record.masked_text, record.original_text);
    assert_eq!(recorded.bodies("/predict")[0]["text"], RAW);

    let strict_recorded = Recorded::default();
    let strict_base = spawn_ai_service(outages, strict_recorded.clone()).await;
    let strict_dir = tempfile::tempdir().unwrap();
    let strict_store: Arc<dyn RecordStore> =
        Arc::new(SledRecordStore::open(strict_dir.path()).unwrap());

    let err = orchestrator(&strict_base, Arc::clone(&strict_store))
        .with_masking_policy(MaskingPolicy::Strict)
        .analyze(RAW)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::MaskingUnavailable(_)));
    assert!(strict_store.find_all().unwrap().is_empty());
    assert!(strict_recorded.bodies("/predict").is_empty());
}

#[tokio::test]
async fn test_duplicate_submissions_get_distinct_ids() {
    let base = spawn_ai_service(Outages::default(), Recorded::default()).await;
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn RecordStore> = Arc::new(SledRecordStore::open(dir.path()).unwrap());
    let orchestrator = orchestrator(&base, Arc::clone(&store));

    let a = orchestrator.analyze(RAW).await.unwrap();
    let b = orchestrator.analyze(RAW).await.unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(store.find_all().unwrap().len(), 2);
}
