//! HTTP stage client
//!
//! One JSON POST per call against the AI service. The base URL comes from
//! configuration; the relative paths are fixed by the service contract.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

use super::{Stage, StageError, StagePayload};

pub const MASK_PATH: &str = "/mask";
pub const PREDICT_PATH: &str = "/predict";
pub const RETRIEVE_PATH: &str = "/retrieve";
pub const GENERATE_PATH: &str = "/generate";

/// Stage reached over HTTP
pub struct HttpStage<Req, Resp> {
    http: reqwest::Client,
    url: String,
    name: &'static str,
    _payload: PhantomData<fn(Req) -> Resp>,
}

impl<Req, Resp> HttpStage<Req, Resp> {
    pub fn new(http: reqwest::Client, base_url: &str, path: &str, name: &'static str) -> Self {
        Self {
            http,
            url: format!("{}{}", base_url.trim_end_matches('/'), path),
            name,
            _payload: PhantomData,
        }
    }

    /// Full endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<Req, Resp> Stage for HttpStage<Req, Resp>
where
    Req: Serialize + Send + Sync,
    Resp: DeserializeOwned + StagePayload + Send,
{
    type Request = Req;
    type Response = Resp;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn call(&self, request: &Req) -> Result<Resp, StageError> {
        let resp = self.http.post(&self.url).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(
                stage = self.name,
                url = %self.url,
                status = %status,
                "Stage returned non-success status"
            );
            return Err(StageError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| StageError::Decode(e.to_string()))
    }
}
