//! Deterministic stand-ins for the network collaborators, shared by tests.

use crate::chunking::TextChunk;
use crate::embedding::Embedder;
use crate::error::{QaError, Result};
use crate::generation::Generator;
use crate::transcript::{Transcript, TranscriptSegment, TranscriptSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn chunks(texts: &[&str]) -> Vec<TextChunk> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| TextChunk::new(t.to_string(), i as i32))
        .collect()
}

/// Bag-of-words embedder: texts sharing words end up close together.
pub struct WordEmbedder {
    dimensions: usize,
}

impl Default for WordEmbedder {
    fn default() -> Self {
        Self { dimensions: 256 }
    }
}

impl WordEmbedder {
    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; self.dimensions];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let hash = word
                .to_lowercase()
                .bytes()
                .fold(2166136261u32, |h, b| (h ^ b as u32).wrapping_mul(16777619));
            vector[hash as usize % self.dimensions] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl Embedder for WordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn model(&self) -> &str {
        "word-embedder"
    }
}

/// Embedder whose provider is never reachable.
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(QaError::OpenAI("connection refused".to_string()))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(QaError::OpenAI("connection refused".to_string()))
    }

    fn model(&self) -> &str {
        "unreachable"
    }
}

type Respond = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

/// Generator answering through a closure and recording every prompt.
pub struct ScriptedGenerator {
    respond: Respond,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Answers from the prompt when it mentions Testville, declines otherwise.
    pub fn testville() -> Self {
        Self::new(|prompt| {
            if prompt.contains("Testville") {
                Ok("The capital of Test Country is Testville.".to_string())
            } else {
                Ok("I do not have knowledge about this.".to_string())
            }
        })
    }

    /// Always fails as if the provider were down.
    pub fn unreachable() -> Self {
        Self::new(|_| Err(QaError::OpenAI("connection refused".to_string())))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.respond)(prompt)
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// What a fake video looks like to the transcript source.
#[derive(Clone)]
pub enum FakeVideo {
    Captions(Vec<&'static str>),
    Disabled,
    Unavailable,
}

/// Transcript source serving canned videos.
#[derive(Default)]
pub struct StaticTranscriptSource {
    videos: HashMap<String, FakeVideo>,
}

impl StaticTranscriptSource {
    pub fn with_video(mut self, video_id: &str, video: FakeVideo) -> Self {
        self.videos.insert(video_id.to_string(), video);
        self
    }
}

#[async_trait]
impl TranscriptSource for StaticTranscriptSource {
    async fn fetch(&self, video: &str, _languages: &[String]) -> Result<Transcript> {
        match self.videos.get(video) {
            Some(FakeVideo::Captions(fragments)) => {
                let segments = fragments
                    .iter()
                    .enumerate()
                    .map(|(i, text)| {
                        TranscriptSegment::new(i as f64 * 2.0, (i + 1) as f64 * 2.0, text.to_string())
                    })
                    .collect();
                Ok(Transcript::new(video.to_string(), "en".to_string(), false, segments))
            }
            Some(FakeVideo::Disabled) => Err(QaError::TranscriptsDisabled(video.to_string())),
            Some(FakeVideo::Unavailable) | None => Err(QaError::VideoUnavailable(format!(
                "{}: This video is unavailable",
                video
            ))),
        }
    }
}
