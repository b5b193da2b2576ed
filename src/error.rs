//! Error types for transcript-qa.

use thiserror::Error;

/// Library-level error type.
#[derive(Error, Debug)]
pub enum QaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("No transcript found for video {video_id} in languages {languages:?}")]
    NoTranscriptFound {
        video_id: String,
        languages: Vec<String>,
    },

    #[error("Video is not available: {0}")]
    VideoUnavailable(String),

    #[error("Transcript fetch failed: {0}")]
    TranscriptFetch(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Answer generation failed: {0}")]
    Generation(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),
}

impl QaError {
    /// True when the video exists but has no usable captions.
    pub fn is_transcript_missing(&self) -> bool {
        matches!(
            self,
            QaError::TranscriptsDisabled(_) | QaError::NoTranscriptFound { .. }
        )
    }
}

/// Result type alias for transcript-qa operations.
pub type Result<T> = std::result::Result<T, QaError>;
