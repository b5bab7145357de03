//! reqwest-backed client for the Energi Data Service API

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, Url};

use super::{FetchOutcome, PriceSource, DATASET_PATH};
use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use crate::types::PriceDataset;

/// Fetches the `Elspotprices` dataset over HTTP.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    dataset_url: Url,
    max_body_bytes: usize,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::config(format!("{:#}", e)))?;

        let dataset_url = resolve_dataset_url(&config.base_url)?;

        // A 3xx is a failed fetch, not a second outbound request
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            dataset_url,
            max_body_bytes: config.max_body_bytes,
        })
    }

    pub fn dataset_url(&self) -> &Url {
        &self.dataset_url
    }

    /// Issue exactly one GET and decode the body. No retries.
    pub async fn try_fetch(&self) -> Result<PriceDataset> {
        tracing::debug!(url = %self.dataset_url, "Fetching spot prices");

        let response = self
            .client
            .get(self.dataset_url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = self.read_body(response).await?;
        let dataset: PriceDataset = serde_json::from_slice(&body)?;

        tracing::debug!(records = dataset.len(), "Fetched spot prices");

        Ok(dataset)
    }

    /// Collect the body, giving up as soon as it exceeds `max_body_bytes`.
    async fn read_body(&self, mut response: Response) -> Result<Vec<u8>> {
        let limit = self.max_body_bytes;

        if let Some(declared) = response.content_length() {
            if declared > limit as u64 {
                return Err(Error::BodyTooLarge { limit });
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(Error::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

#[async_trait]
impl PriceSource for UpstreamClient {
    async fn fetch(&self) -> FetchOutcome {
        let outcome = FetchOutcome::from(self.try_fetch().await);

        if let Some(cause) = outcome.cause() {
            tracing::debug!(url = %self.dataset_url, error = ?cause, "Upstream fetch failed");
        }

        outcome
    }
}

/// Append the dataset path to the base URL, keeping any path prefix.
fn resolve_dataset_url(base_url: &str) -> Result<Url> {
    let base = base_url.trim().trim_end_matches('/');
    let joined = format!("{}{}", base, DATASET_PATH);

    Url::parse(&joined)
        .map_err(|e| Error::config(format!("invalid upstream URL '{}': {}", joined, e)))
}
