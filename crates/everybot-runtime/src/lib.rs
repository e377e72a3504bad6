//! Runtime orchestrator — coordinates one retrieval and one completion per message.
//!
//! Each call is stateless and single-turn: retrieve, render the prompt,
//! complete, and hand back the reply with the citations it was grounded on.

pub mod orchestrator;
pub mod prompt;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::*;
