//! Prompt assembly.

use everybot_chat::ChatMessage;
use everybot_core::{CitationChunk, Result};

/// Fixes the reply language and the inline citation marker format.
pub const SYSTEM_PROMPT: &str = "Responda em português. Inclua citações no formato [C1], [C2]...";

/// Render chunks as `[C<i>] <text>` lines, `i` being the 1-based position.
pub fn render_context(chunks: &[CitationChunk]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, c)| format!("[C{}] {}", i + 1, c.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the `[system, user]` conversation for a message and its context.
pub fn build_messages(user_message: &str, chunks: &[CitationChunk]) -> Result<Vec<ChatMessage>> {
    let user = format!("{}\nContexto:\n{}", user_message, render_context(chunks));
    Ok(vec![ChatMessage::system(SYSTEM_PROMPT)?, ChatMessage::user(user)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, score: f64, text: &str) -> CitationChunk {
        CitationChunk {
            chunk_id: id.into(),
            score,
            text: text.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_positions_not_ids() {
        let chunks = vec![
            chunk("z-9", 10.0, "baixa relevância primeiro"),
            chunk("a-1", 99.0, "alta relevância depois"),
            chunk("m-5", 50.0, "meio"),
        ];
        let rendered = render_context(&chunks);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[C1] baixa relevância primeiro");
        assert_eq!(lines[1], "[C2] alta relevância depois");
        assert_eq!(lines[2], "[C3] meio");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_context(&[]), "");
    }

    #[test]
    fn test_build_messages_scenario() {
        let chunks = vec![chunk("c1", 0.0, "Abrimos às 9h"), chunk("c2", 0.0, "Fechamos às 18h")];
        let messages = build_messages("Qual é o horário?", &chunks).unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role(), "system");
        assert_eq!(messages[0].content(), SYSTEM_PROMPT);
        assert_eq!(messages[1].role(), "user");
        assert_eq!(
            messages[1].content(),
            "Qual é o horário?\nContexto:\n[C1] Abrimos às 9h\n[C2] Fechamos às 18h"
        );
        assert!(messages[1]
            .content()
            .ends_with("Contexto:\n[C1] Abrimos às 9h\n[C2] Fechamos às 18h"));
    }

    #[test]
    fn test_build_messages_without_context() {
        let messages = build_messages("Oi", &[]).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content(), "Oi\nContexto:\n");
    }

    #[test]
    fn test_system_prompt_mentions_markers() {
        assert!(SYSTEM_PROMPT.contains("português"));
        assert!(SYSTEM_PROMPT.contains("[C1]"));
    }
}
