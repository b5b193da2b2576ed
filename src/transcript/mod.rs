//! Transcript fetching.
//!
//! A [`TranscriptSource`] turns a video identifier into the caption text of
//! that video in one of the preferred languages.

mod models;
mod youtube;

pub use models::{Transcript, TranscriptSegment};
pub use youtube::YoutubeTranscriptSource;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video ID or URL.
    ///
    /// `languages` is in priority order. Disabled captions are reported as
    /// `TranscriptsDisabled`, a missing language as `NoTranscriptFound`.
    async fn fetch(&self, video: &str, languages: &[String]) -> Result<Transcript>;
}
