//! OpenAI-compatible chat completion client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use litnet_core::cancel::CancelToken;
use litnet_core::config::GenerationConfig;
use litnet_core::errors::{LitNetResult, ServiceError};
use litnet_core::models::ChatMessage;
use litnet_core::traits::IGenerationService;

use crate::retry::retry_with_backoff;

const PROVIDER: &str = "generation";
const BASE_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct RemoteGenerationService {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    max_retries: u32,
    timeout: Duration,
}

impl RemoteGenerationService {
    pub fn new(config: &GenerationConfig) -> LitNetResult<Self> {
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
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_retries: config.max_retries,
            timeout,
        })
    }

    fn request(&self, messages: &[ChatMessage]) -> LitNetResult<String> {
        let wire: Vec<WireMessage<'_>> = messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect();
        let body = serde_json::json!({
            "model": self.model,
            "messages": wire,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });
        let url = format!("{}/chat/completions", self.endpoint);
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

        let parsed: CompletionResponse = response.json().map_err(|e| ServiceError::Provider {
            provider: PROVIDER.to_string(),
            reason: format!("malformed response: {e}"),
        })?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                ServiceError::Provider {
                    provider: PROVIDER.to_string(),
                    reason: "response contained no choices".to_string(),
                }
                .into()
            })
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

impl IGenerationService for RemoteGenerationService {
    fn complete(&self, messages: &[ChatMessage], cancel: &CancelToken) -> LitNetResult<String> {
        retry_with_backoff(PROVIDER, self.max_retries, BASE_RETRY_DELAY, cancel, || {
            self.request(messages)
        })
    }

    fn name(&self) -> &str {
        "remote-openai"
    }
}
