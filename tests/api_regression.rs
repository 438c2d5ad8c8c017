//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! the /api endpoints using `tower::ServiceExt::oneshot()`. Stages talk to a
//! fake AI service over loopback HTTP.

mod common;

use complaint_ops::api::{create_app, ApiState};
use complaint_ops::config::StagesConfig;
use complaint_ops::pipeline::PipelineOrchestrator;
use complaint_ops::stages::StageClients;
use complaint_ops::storage::InMemoryRecordStore;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{spawn_ai_service, Outages, Recorded};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

async fn test_app(outages: Outages) -> Router {
    let base = spawn_ai_service(outages, Recorded::default()).await;
    let stages = StageClients::from_config(&StagesConfig {
        base_url: base,
        request_timeout_secs: Some(5),
    })
    .unwrap();
    let orchestrator = PipelineOrchestrator::new(stages, Arc::new(InMemoryRecordStore::new()));
    create_app(ApiState::new(Arc::new(orchestrator)), &[])
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn post_analyze(text: &str) -> Request<Body> {
    Request::post("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "text": text }).to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_analyze_then_fetch() {
    let app = test_app(Outages::default()).await;

    let (status, created) = send(&app, post_analyze("My order #123 never arrived")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "ANALYZED");
    assert_eq!(created["category"], "SHIPPING");
    assert_eq!(created["urgency"], "HIGH");
    assert_eq!(created["maskedText"], "My order #[ORDER_ID] never arrived");
    assert!(created["createdAt"].is_string());

    let id = created["id"].as_u64().unwrap();
    let (status, fetched) = send(&app, get(&format!("/api/complaints/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, list) = send(&app, get("/api/complaints")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_all_stages_down_still_returns_analyzed_record() {
    let outages = Outages { mask: true, predict: true, retrieve: true, generate: true };
    let app = test_app(outages).await;

    let (status, created) = send(&app, post_analyze("Refund me now")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "ANALYZED");
    assert_eq!(created["maskedText"], "Refund me now");
    assert_eq!(created["category"], "MANUAL_REVIEW");
    assert_eq!(created["urgency"], "MEDIUM");
    assert_eq!(created["customerReplyDraft"], "Error generating draft.");
}

#[tokio::test]
async fn test_blank_text_is_rejected() {
    let app = test_app(Outages::default()).await;

    let (status, body) = send(&app, post_analyze("  \n ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (_, list) = send(&app, get("/api/complaints")).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_complaint_is_404() {
    let app = test_app(Outages::default()).await;

    let (status, body) = send(&app, get("/api/complaints/4242")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Complaint 4242 not found");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(Outages::default()).await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
    assert_eq!(body["store"], "InMemory");
}
