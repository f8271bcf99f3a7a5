use serde::Serialize;
use serde_json::Value;
use tokio::time::Duration;
use tracing::{debug, warn};

use crate::{
    config::UPSTREAM_TIMEOUT_SECONDS,
    error::{ApiError, ErrorCode, ErrorEnvelope},
    proxy::DownloadRequest,
};

/// Upstream JSON body, or the synthesized `request_failed` envelope.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DownloadResult {
    Upstream(Value),
    Failed(ErrorEnvelope),
}

#[derive(Debug, Clone)]
pub struct CobaltClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl CobaltClient {
    /// `api_url` must already be normalized (no trailing slash).
    pub fn new(api_url: &str) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECONDS))
            .build()
            .map_err(|error| ApiError::internal(format!("Could not build HTTP client: {error}")))?;

        Ok(Self {
            http_client,
            endpoint: format!("{api_url}/"),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Never fails: transport errors come back as a `request_failed` envelope.
    pub async fn send_download_request(&self, request: &DownloadRequest) -> DownloadResult {
        match self.post(request).await {
            Ok(body) => {
                debug!("Cobalt answered for URL {:?}", request.url);
                DownloadResult::Upstream(body)
            }
            Err(error) => {
                warn!("Cobalt request failed for URL {:?}: {error}", request.url);
                request_failed(&error)
            }
        }
    }

    async fn post(&self, request: &DownloadRequest) -> Result<Value, reqwest::Error> {
        self.http_client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request.payload())
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }
}

fn request_failed(error: &reqwest::Error) -> DownloadResult {
    let mut context = error.to_string();
    if let Some(source) = std::error::Error::source(error) {
        context = format!("{context}: {source}");
    }
    DownloadResult::Failed(ErrorEnvelope::new(ErrorCode::RequestFailed, Some(context)))
}
