//! Recursive character splitting.
//!
//! Splits on the coarsest separator present in the text, merges the pieces
//! back into chunks of at most `chunk_size` characters, and only recurses
//! into finer separators for pieces that are still too long. Consecutive
//! chunks share up to `chunk_overlap` characters of trailing pieces.

use super::{Chunker, ChunkingConfig, TextChunk};
use crate::error::{QaError, Result};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Greedy recursive splitter over a separator hierarchy.
pub struct RecursiveChunker {
    config: ChunkingConfig,
}

impl RecursiveChunker {
    /// Create a chunker, validating size and overlap.
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(QaError::Config("chunk_size must be greater than 0".to_string()));
        }
        if config.chunk_overlap > config.chunk_size {
            return Err(QaError::Config(format!(
                "chunk_overlap ({}) is larger than chunk_size ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }

        Ok(Self { config })
    }

    /// Split text into trimmed, non-empty chunks.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_with(text, &self.config.separators)
    }

    fn split_with(&self, text: &str, separators: &[String]) -> Vec<String> {
        let (separator, finer) = pick_separator(text, separators);
        let mut chunks = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(&piece) < self.config.chunk_size {
                pending.push(piece);
                continue;
            }

            if !pending.is_empty() {
                chunks.extend(self.merge(&pending));
                pending.clear();
            }

            if finer.is_empty() {
                let trimmed = piece.trim();
                if !trimmed.is_empty() {
                    chunks.push(trimmed.to_string());
                }
            } else {
                chunks.extend(self.split_with(&piece, finer));
            }
        }

        if !pending.is_empty() {
            chunks.extend(self.merge(&pending));
        }

        chunks
    }

    /// Greedily pack pieces into chunks, carrying trailing pieces over as
    /// overlap.
    fn merge(&self, pieces: &[String]) -> Vec<String> {
        let size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;

        let mut chunks = Vec::new();
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);

            if total + len > size {
                if total > size {
                    warn!("Created a chunk of {} characters, longer than {}", total, size);
                }

                if !window.is_empty() {
                    push_joined(&window, &mut chunks);

                    while total > overlap || (total + len > size && total > 0) {
                        match window.pop_front() {
                            Some((_, front_len)) => total -= front_len,
                            None => break,
                        }
                    }
                }
            }

            window.push_back((piece.as_str(), len));
            total += len;
        }

        push_joined(&window, &mut chunks);
        chunks
    }
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, text: &str) -> Vec<TextChunk> {
        let chunks: Vec<TextChunk> = self
            .split_text(text)
            .into_iter()
            .enumerate()
            .map(|(order, content)| TextChunk::new(content, order as i32))
            .collect();

        debug!("Split {} characters into {} chunks", char_len(text), chunks.len());
        chunks
    }
}

/// First separator present in the text, plus the finer ones after it.
fn pick_separator<'a>(text: &str, separators: &'a [String]) -> (&'a str, &'a [String]) {
    for (i, separator) in separators.iter().enumerate() {
        if separator.is_empty() {
            return ("", &[]);
        }
        if text.contains(separator.as_str()) {
            return (separator, &separators[i + 1..]);
        }
    }

    (separators.last().map(String::as_str).unwrap_or(""), &[])
}

/// Split text with the separator kept at the end of each piece.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(String::from).collect();
    }

    text.split_inclusive(separator)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

fn push_joined(window: &VecDeque<(&str, usize)>, chunks: &mut Vec<String>) {
    let joined: String = window.iter().map(|(piece, _)| *piece).collect();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
