//! Data models for fetched transcripts.

use serde::{Deserialize, Serialize};

/// A complete transcript with its caption fragments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Language code of the caption track.
    pub language_code: String,
    /// Whether the track was generated by speech recognition.
    pub is_generated: bool,
    /// Caption fragments in playback order.
    pub segments: Vec<TranscriptSegment>,
    /// Fragment texts joined by single spaces.
    pub full_text: String,
}

impl Transcript {
    /// Create a new transcript from segments.
    pub fn new(
        video_id: String,
        language_code: String,
        is_generated: bool,
        segments: Vec<TranscriptSegment>,
    ) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            video_id,
            language_code,
            is_generated,
            segments,
            full_text,
        }
    }

    /// Playback length covered by the captions, in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.segments
            .last()
            .map(|s| s.end_seconds)
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty()
    }
}

/// A single caption fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds.
    pub end_seconds: f64,
    /// Caption text.
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start_seconds: f64, end_seconds: f64, text: String) -> Self {
        Self {
            start_seconds,
            end_seconds,
            text,
        }
    }

    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}
