//! In-process fake AI service shared by the integration tests.

#![allow(dead_code)]

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Requests received by the fake service, keyed by path
#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<(String, Value)>>>);

impl Recorded {
    fn push(&self, path: &str, body: Value) {
        self.0.lock().unwrap().push((path.to_string(), body));
    }

    pub fn bodies(&self, path: &str) -> Vec<Value> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, b)| b.clone())
            .collect()
    }
}

/// Which stages should answer with HTTP 500
#[derive(Clone, Copy, Default)]
pub struct Outages {
    pub mask: bool,
    pub predict: bool,
    pub retrieve: bool,
    pub generate: bool,
}

fn respond(down: bool, body: Value) -> axum::response::Response {
    if down {
        (StatusCode::INTERNAL_SERVER_ERROR, "stage down").into_response()
    } else {
        Json(body).into_response()
    }
}

/// Start the fake AI service on an ephemeral port and return its base URL.
pub async fn spawn_ai_service(outages: Outages, recorded: Recorded) -> String {
    let (r1, r2, r3, r4) = (recorded.clone(), recorded.clone(), recorded.clone(), recorded);

    let app = Router::new()
        .route(
            "/mask",
            post(move |Json(body): Json<Value>| async move {
                r1.push("/mask", body.clone());
                let text = body["text"]
                    .as_str()
                    .unwrap_or_default()
                    .replace("#123", "#[ORDER_ID]");
                respond(
                    outages.mask,
                    json!({ "masked_text": text, "masked_entities": ["ORDER_ID"] }),
                )
            }),
        )
        .route(
            "/predict",
            post(move |Json(body): Json<Value>| async move {
                r2.push("/predict", body);
                respond(
                    outages.predict,
                    json!({
                        "category": "SHIPPING",
                        "category_confidence": 0.94,
                        "urgency": "HIGH",
                        "urgency_confidence": 0.88
                    }),
                )
            }),
        )
        .route(
            "/retrieve",
            post(move |Json(body): Json<Value>| async move {
                r3.push("/retrieve", body);
                respond(
                    outages.retrieve,
                    json!({ "relevant_snippets": ["Lost parcels are refunded after 14 days."] }),
                )
            }),
        )
        .route(
            "/generate",
            post(move |Json(body): Json<Value>| async move {
                r4.push("/generate", body);
                respond(
                    outages.generate,
                    json!({
                        "action_plan": ["Issue refund", "Apologize"],
                        "customer_reply_draft": "We're sorry your order has not arrived.",
                        "risk_flags": []
                    }),
                )
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
