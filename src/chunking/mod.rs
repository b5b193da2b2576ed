//! Content chunking for breaking transcripts into retrievable segments.

mod recursive;

pub use recursive::RecursiveChunker;

use crate::config::ChunkingSettings;
use serde::{Deserialize, Serialize};

/// A chunk of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Text content of this chunk.
    pub content: String,
    /// Position of this chunk in its source text.
    pub order: i32,
}

impl TextChunk {
    pub fn new(content: String, order: i32) -> Self {
        Self { content, order }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Configuration for chunking.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between neighbouring chunks.
    pub chunk_overlap: usize,
    /// Split boundaries, coarsest first. An empty string means "any character".
    pub separators: Vec<String>,
}

impl ChunkingConfig {
    /// Paragraph, line, sentence, word, character.
    pub fn default_separators() -> Vec<String> {
        ["\n\n", "\n", ". ", " ", ""]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            separators: Self::default_separators(),
        }
    }
}

impl From<&ChunkingSettings> for ChunkingConfig {
    fn from(settings: &ChunkingSettings) -> Self {
        Self {
            chunk_size: settings.chunk_size,
            chunk_overlap: settings.chunk_overlap,
            separators: Self::default_separators(),
        }
    }
}

/// Trait for text chunking implementations.
pub trait Chunker: Send + Sync {
    /// Split text into ordered chunks.
    fn chunk(&self, text: &str) -> Vec<TextChunk>;
}
