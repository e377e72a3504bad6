//! Orchestrator: retrieve, then complete.

use std::sync::Arc;

use everybot_chat::CompletionService;
use everybot_core::{Error, Result};
use everybot_retrieve::{Retriever, DEFAULT_TOP_K};
use tracing::{debug, info, warn};

use crate::prompt;
use crate::types::RagAnswer;

/// Answers a single message using injected retrieval and completion services.
pub struct Orchestrator {
    retriever: Arc<dyn Retriever>,
    completion: Arc<dyn CompletionService>,
    top_k: usize,
}

impl Orchestrator {
    pub fn new(retriever: Arc<dyn Retriever>, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            retriever,
            completion,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn completion(&self) -> &dyn CompletionService {
        self.completion.as_ref()
    }

    /// Answer `message`. Retrieval and completion run strictly in sequence;
    /// either failure aborts the whole answer.
    pub async fn answer(&self, message: &str) -> Result<RagAnswer> {
        if message.trim().is_empty() {
            return Err(Error::invalid_request("message must not be empty"));
        }

        let citations = self
            .retriever
            .retrieve(message, self.top_k)
            .await
            .map_err(|e| {
                warn!("Retrieval failed: {}", e);
                e
            })?;
        debug!("Retrieved {} chunks", citations.len());

        let messages = prompt::build_messages(message, &citations)?;

        let reply = self
            .completion
            .complete(&messages)
            .await
            .map_err(|e| {
                warn!("Completion failed: {}", e);
                e
            })?;

        info!(
            "Answered with model {} ({} citations, {} chars)",
            self.completion.model(),
            citations.len(),
            reply.len()
        );

        Ok(RagAnswer { reply, citations })
    }
}
