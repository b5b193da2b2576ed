//! RAG (Retrieval-Augmented Generation) for question answering.
//!
//! Answers questions strictly from transcript chunks previously added to the
//! collection.

pub mod context;
mod engine;

pub use context::format_context_for_prompt;
pub use engine::{RagEngine, RagResponse, DEFAULT_TOP_K};

use crate::vector_store::SearchResult;

/// A retrieved chunk used as answer context.
#[derive(Debug, Clone)]
pub struct ContextChunk {
    /// Text content.
    pub content: String,
    /// Similarity score.
    pub score: f32,
}

impl From<SearchResult> for ContextChunk {
    fn from(result: SearchResult) -> Self {
        Self {
            content: result.document.content,
            score: result.score,
        }
    }
}
