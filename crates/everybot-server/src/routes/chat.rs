//! Chat routes — single-turn answers grounded on retrieved citations.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use everybot_chat::ChatStatus;
use everybot_core::Error;
use everybot_runtime::RagAnswer;
use serde::Deserialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/status", get(get_status))
}

/// Incoming chat request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<RagAnswer>, ApiError> {
    let request_id = Uuid::new_v4();

    async move {
        // Any content type; the body itself must be JSON.
        let req: ChatRequest = serde_json::from_slice(&body)
            .map_err(|e| Error::invalid_request(format!("Invalid chat request: {}", e)))?;
        let start = Instant::now();

        let answer = state.orchestrator.answer(&req.message).await?;

        info!(
            "Chat answered in {}ms with {} citations",
            start.elapsed().as_millis(),
            answer.citations.len()
        );

        Ok::<_, ApiError>(Json(answer))
    }
    .instrument(info_span!("chat", %request_id))
    .await
}

async fn get_status(State(state): State<Arc<AppState>>) -> Json<ChatStatus> {
    let completion = state.orchestrator.completion();
    Json(ChatStatus {
        llm_available: completion.is_available(),
        model: completion.model().to_string(),
        search_endpoint: state.config.search.endpoint.clone(),
    })
}
