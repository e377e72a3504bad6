//! Shared application state.

use std::sync::Arc;

use everybot_chat::{CompletionService, OpenAiCompletion};
use everybot_core::{EverybotConfig, Result};
use everybot_retrieve::{HttpRetriever, Retriever};
use everybot_runtime::Orchestrator;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: EverybotConfig,
    pub orchestrator: Orchestrator,
}

impl AppState {
    /// Build state around explicitly provided services.
    pub fn new(
        config: EverybotConfig,
        retriever: Arc<dyn Retriever>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self {
            config,
            orchestrator: Orchestrator::new(retriever, completion),
        }
    }

    /// Build state with the HTTP search client and the OpenAI-compatible
    /// completion client described by `config`.
    pub fn from_config(config: EverybotConfig) -> Result<Self> {
        let retriever = Arc::new(HttpRetriever::new(&config.search)?);
        let completion = Arc::new(OpenAiCompletion::new(&config.completion)?);
        Ok(Self::new(config, retriever, completion))
    }
}
