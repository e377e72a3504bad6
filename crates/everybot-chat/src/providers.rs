//! Completion provider implementations.
//!
//! The OpenAI chat-completions format is the only one spoken; any compatible
//! endpoint can be targeted through the configured base URL.

use async_trait::async_trait;
use everybot_core::{CompletionSettings, Error, Result};
use reqwest::Client;
use tracing::{debug, error};

use crate::types::{ChatMessage, CompletionRequest, CompletionResponse};

/// Generates a reply for a conversation.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send `messages` and return the first choice's text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Model name sent with each request.
    fn model(&self) -> &str;

    /// Whether requests can be made at all (e.g., credentials present).
    fn is_available(&self) -> bool {
        true
    }
}

/// Client for `POST {base_url}/chat/completions`.
pub struct OpenAiCompletion {
    client: Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiCompletion {
    /// Build a provider with its own client, applying the configured timeout.
    pub fn new(settings: &CompletionSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build completion client: {}", e)))?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: Client, settings: &CompletionSettings) -> Self {
        Self {
            client,
            url: format!(
                "{}/chat/completions",
                settings.base_url.trim_end_matches('/')
            ),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        }
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::NotConfigured("OPENAI_API_KEY is not set".into()))?;

        debug!("Requesting completion from {} with model {}", self.url, self.model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Completion API error {}", status);
            return Err(Error::completion(format!("API error {}: {}", status, body)));
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                request_error(e)
            } else {
                Error::completion(format!("Invalid completion response: {}", e))
            }
        })?;

        parsed.first_content()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

fn request_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout {
            service: "completion service",
        }
    } else {
        Error::completion(format!("Request failed: {}", e))
    }
}
