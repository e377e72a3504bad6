//! Retriever — fetches ranked citation chunks from the external search service.
//!
//! Ranking, indexing and embeddings all live in the search service; this crate
//! only performs the request/response exchange and types the result.

pub mod retriever;

pub use retriever::{HttpRetriever, Retriever, DEFAULT_TOP_K};
