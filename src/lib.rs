//! transcript-qa - question answering over YouTube transcripts
//!
//! Upload a video's captions once, then ask questions that are answered only
//! from what was said in the uploaded videos.
//!
//! # Architecture
//!
//! - `transcript` - caption fetching from YouTube
//! - `chunking` - recursive character splitting
//! - `embedding` / `generation` - OpenAI-compatible provider calls
//! - `vector_store` - append-only chunk storage and similarity search
//! - `rag` - retrieval and answer generation
//! - `service` - upload and ask operations with their response bodies
//! - `api` - axum routes under `/api/v1/transcript`
//!
//! # Example
//!
//! ```rust,no_run
//! use transcript_qa::config::Settings;
//! use transcript_qa::service::TranscriptService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let service = TranscriptService::from_settings(&settings)?;
//!
//!     let upload = service.upload_transcript("dQw4w9WgXcQ").await;
//!     println!("{} ({})", upload.message, upload.status);
//!
//!     let answer = service.ask_question("What is the song about?").await;
//!     println!("{}", answer.data);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod openai;
pub mod rag;
pub mod service;
pub mod transcript;
pub mod vector_store;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{QaError, Result};
