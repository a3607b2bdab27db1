//! OpenAI-compatible embedding client.

use std::time::Duration;

use serde::Deserialize;

use litnet_core::cancel::CancelToken;
use litnet_core::config::EmbeddingConfig;
use litnet_core::errors::{LitNetResult, ServiceError};
use litnet_core::traits::IEmbeddingProvider;

use crate::retry::retry_with_backoff;

const PROVIDER: &str = "embeddings";
const BASE_RETRY_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    index: usize,
    embedding: Vec<f32>,
}

pub struct RemoteEmbeddingProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimensions: usize,
    max_retries: u32,
    timeout: Duration,
}

impl RemoteEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig) -> LitNetResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Provider {
                provider: PROVIDER.to_string(),
                reason: format!("client construction failed: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            dimensions: config.dimensions,
            max_retries: config.max_retries,
            timeout,
        })
    }

    fn request(&self, texts: &[String]) -> LitNetResult<Vec<Vec<f32>>> {
        let url = format!("{}/embeddings", self.endpoint);
        let body = serde_json::json!({
            "model": self.model,
            "input": texts,
        });
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(ServiceError::Provider {
                provider: PROVIDER.to_string(),
                reason: format!("HTTP {status}: {detail}"),
            }
            .into());
        }

        let parsed: EmbeddingResponse = response.json().map_err(|e| ServiceError::Provider {
            provider: PROVIDER.to_string(),
            reason: format!("malformed response: {e}"),
        })?;
        if parsed.data.len() != texts.len() {
            return Err(ServiceError::Provider {
                provider: PROVIDER.to_string(),
                reason: format!(
                    "expected {} embeddings, got {}",
                    texts.len(),
                    parsed.data.len()
                ),
            }
            .into());
        }
        let mut rows = parsed.data;
        rows.sort_by_key(|row| row.index);
        Ok(rows.into_iter().map(|row| row.embedding).collect())
    }

    fn map_transport(&self, error: reqwest::Error) -> ServiceError {
        if error.is_timeout() {
            ServiceError::Timeout {
                provider: PROVIDER.to_string(),
                elapsed_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ServiceError::Provider {
                provider: PROVIDER.to_string(),
                reason: error.to_string(),
            }
        }
    }
}

impl IEmbeddingProvider for RemoteEmbeddingProvider {
    fn embed(&self, text: &str, cancel: &CancelToken) -> LitNetResult<Vec<f32>> {
        let mut vectors = self.embed_batch(std::slice::from_ref(&text.to_string()), cancel)?;
        vectors.pop().ok_or_else(|| {
            ServiceError::Provider {
                provider: PROVIDER.to_string(),
                reason: "empty embedding response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String], cancel: &CancelToken) -> LitNetResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        retry_with_backoff(
            PROVIDER,
            self.max_retries,
            BASE_RETRY_DELAY,
            cancel,
            || self.request(texts),
        )
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "remote-openai"
    }

    fn is_available(&self) -> bool {
        !self.endpoint.is_empty() && !self.api_key.is_empty()
    }
}
