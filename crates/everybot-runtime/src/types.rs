//! Runtime types.

use everybot_core::CitationChunk;
use serde::Serialize;

/// Outcome of answering one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RagAnswer {
    /// Model reply; empty when the completion carried no content.
    pub reply: String,
    /// Chunks exactly as the retriever returned them.
    pub citations: Vec<CitationChunk>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let answer = RagAnswer {
            reply: "Abrimos às 9h [C1].".into(),
            citations: vec![CitationChunk {
                chunk_id: "c1".into(),
                text: "Abrimos às 9h".into(),
                ..Default::default()
            }],
        };
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(value["reply"], "Abrimos às 9h [C1].");
        assert_eq!(value["citations"][0]["chunk_id"], "c1");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }
}
