//! Search service client.

use async_trait::async_trait;
use everybot_core::{CitationChunk, Error, Result, SearchSettings};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of chunks requested when the caller doesn't say otherwise.
pub const DEFAULT_TOP_K: usize = 5;

/// Source of citation chunks for a query.
///
/// Implementations:
/// - `HttpRetriever`: external search service over HTTP
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Fetch up to `top_k` chunks for `query`, most relevant first.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<CitationChunk>>;

    /// Fetch with [`DEFAULT_TOP_K`].
    async fn retrieve_default(&self, query: &str) -> Result<Vec<CitationChunk>> {
        self.retrieve(query, DEFAULT_TOP_K).await
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    top_k: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<CitationChunk>,
}

/// Retriever backed by the search service's `POST /search` endpoint.
pub struct HttpRetriever {
    client: Client,
    endpoint: String,
}

impl HttpRetriever {
    /// Build a retriever with its own client, applying the configured timeout.
    pub fn new(settings: &SearchSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build search client: {}", e)))?;
        Ok(Self::with_client(client, &settings.endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Retriever for HttpRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<CitationChunk>> {
        debug!("Searching {} (top_k={})", self.endpoint, top_k);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SearchRequest { query, top_k })
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Search service returned {}", status);
            return Err(Error::retrieval(format!(
                "Search service returned {}: {}",
                status, body
            )));
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                request_error(e)
            } else {
                Error::retrieval(format!("Invalid search response: {}", e))
            }
        })?;

        debug!("Search returned {} chunks", parsed.results.len());
        Ok(parsed.results)
    }
}

fn request_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout {
            service: "search service",
        }
    } else {
        Error::retrieval(format!("Request failed: {}", e))
    }
}
