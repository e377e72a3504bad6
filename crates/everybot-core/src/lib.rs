//! EveryBot Core — shared citation type plus error and configuration plumbing.

pub mod config;
pub mod error;
pub mod types;

pub use config::{CompletionSettings, EverybotConfig, SearchSettings};
pub use error::{Error, Result};
pub use types::CitationChunk;
