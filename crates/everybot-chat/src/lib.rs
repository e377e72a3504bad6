//! Chat completion against an external OpenAI-compatible API.
//!
//! Generation happens entirely in the vendor API; no local model is required.

pub mod providers;
pub mod types;

pub use providers::{CompletionService, OpenAiCompletion};
pub use types::*;
