//! Upstream draw service client.
//!
//! Every call is a fresh GET; request-side no-cache directives keep any
//! intermediate cache from answering for the upstream.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{Result, SmorfiaError};
use crate::models::DrawnNumberBatch;

/// Path of the draw endpoint on the upstream service.
pub const RANDOM_PATH: &str = "/api/v1/random";

/// Produces one fresh draw per call.
#[async_trait]
pub trait NumberSource: Send + Sync {
    async fn fetch_batch(&self) -> Result<DrawnNumberBatch>;
}

/// [`NumberSource`] backed by the upstream HTTP generator.
pub struct HttpNumberSource {
    http: Client,
    endpoint: Url,
}

impl HttpNumberSource {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| SmorfiaError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: draw_endpoint(&config.base_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl NumberSource for HttpNumberSource {
    async fn fetch_batch(&self) -> Result<DrawnNumberBatch> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| SmorfiaError::UpstreamUnreachable(transport_detail(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SmorfiaError::UpstreamError {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SmorfiaError::UpstreamUnreachable(transport_detail(&e)))?;

        let batch: DrawnNumberBatch = serde_json::from_slice(&body)
            .map_err(|e| SmorfiaError::UpstreamMalformed(e.to_string()))?;

        debug!(count = batch.len(), "fetched draw from upstream");
        Ok(batch)
    }
}

/// `{base}/api/v1/random`, keeping any path prefix on the base URL.
fn draw_endpoint(base: &Url) -> Result<Url> {
    let joined = format!("{}{}", base.as_str().trim_end_matches('/'), RANDOM_PATH);
    Url::parse(&joined)
        .map_err(|e| SmorfiaError::Config(format!("invalid upstream endpoint {joined:?}: {e}")))
}

fn transport_detail(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("timed out: {e}")
    } else {
        e.to_string()
    }
}
