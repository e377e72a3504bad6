//! Chat types: prompt messages and the completion API wire format.

use everybot_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Non-blank message text. Only constructible through [`MessageContent::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(Error::invalid_request("message content must not be empty"));
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A prompt message. Serializes as `{"role": "...", "content": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System { content: MessageContent },
    User { content: MessageContent },
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Result<Self> {
        Ok(Self::System {
            content: MessageContent::new(content)?,
        })
    }

    pub fn user(content: impl Into<String>) -> Result<Self> {
        Ok(Self::User {
            content: MessageContent::new(content)?,
        })
    }

    pub fn role(&self) -> &'static str {
        match self {
            ChatMessage::System { .. } => "system",
            ChatMessage::User { .. } => "user",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ChatMessage::System { content } | ChatMessage::User { content } => content.as_str(),
        }
    }
}

/// Body sent to `/chat/completions`. No sampling parameters are set.
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Text of the first choice; empty when the choice has no content.
    pub fn first_content(self) -> Result<String> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::completion("Completion response contained no choices"))?;
        Ok(choice
            .message
            .and_then(|m| m.content)
            .unwrap_or_default())
    }
}

/// Chat status response.
#[derive(Debug, Clone, Serialize)]
pub struct ChatStatus {
    #[serde(rename = "llmAvailable")]
    pub llm_available: bool,
    pub model: String,
    #[serde(rename = "searchEndpoint")]
    pub search_endpoint: String,
}
