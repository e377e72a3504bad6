//! Retrieval types shared between the search client and the chat surface.

use serde::{Deserialize, Serialize};

/// A single passage returned by the search service.
///
/// Field names match the search service's wire format and are passed through
/// to chat clients unchanged. `score` is whatever the service computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationChunk {
    pub chunk_id: String,
    pub title: String,
    pub url: String,
    pub score: f64,
    pub text: String,
}
