//! Context formatting for RAG prompts.

use super::ContextChunk;

/// Join chunk texts with blank lines, in retrieval order.
pub fn format_context_for_prompt(chunks: &[ContextChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
