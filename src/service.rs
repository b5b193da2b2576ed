//! Upload and question-answering operations behind the HTTP surface.
//!
//! [`TranscriptService`] owns every collaborator (transcript source, chunker,
//! collection, RAG engine) and turns their results into the response bodies
//! the API returns.

use crate::chunking::{Chunker, ChunkingConfig, RecursiveChunker};
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{QaError, Result};
use crate::generation::{Generator, OpenAIGenerator};
use crate::openai::create_client;
use crate::rag::RagEngine;
use crate::transcript::{TranscriptSource, YoutubeTranscriptSource};
use crate::vector_store::{Collection, MemoryVectorStore, SqliteVectorStore, VectorStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Transcript Uploaded Successfully";
pub const TRANSCRIPT_NOT_FOUND_MESSAGE: &str = "NO CONTENT FOUND OR NO TRANSCRIPT FOUND";
pub const VIDEO_UNAVAILABLE_MESSAGE: &str = "Video is Not Available";
pub const ANSWER_SUCCESS_MESSAGE: &str = "Response Generated Successfully";
pub const SERVER_ERROR_MESSAGE: &str = "There is problem in server. Try again Later!";

/// Body returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptUploadResponse {
    pub message: String,
    pub status: u16,
    pub success: bool,
}

/// Body returned by the ask endpoint. `data` is empty on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub message: String,
    pub status: u16,
    pub success: bool,
    pub data: String,
}

/// A successful upload.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub video_id: String,
    pub chunks_indexed: usize,
    /// Playback time covered by the captions, in seconds.
    pub duration_seconds: f64,
}

/// Why an upload did not index anything.
#[derive(Debug)]
pub enum UploadFailure {
    /// Captions are disabled or missing for every preferred language.
    TranscriptNotFound(QaError),
    /// The video could not be fetched at all.
    VideoUnavailable(QaError),
    /// Chunking, embedding or storage failed.
    Indexing(QaError),
}

impl UploadFailure {
    fn from_fetch(err: QaError) -> Self {
        if err.is_transcript_missing() {
            UploadFailure::TranscriptNotFound(err)
        } else {
            UploadFailure::VideoUnavailable(err)
        }
    }

    pub fn error(&self) -> &QaError {
        match self {
            UploadFailure::TranscriptNotFound(e)
            | UploadFailure::VideoUnavailable(e)
            | UploadFailure::Indexing(e) => e,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            UploadFailure::TranscriptNotFound(_) | UploadFailure::VideoUnavailable(_) => 404,
            UploadFailure::Indexing(_) => 500,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            UploadFailure::TranscriptNotFound(_) => TRANSCRIPT_NOT_FOUND_MESSAGE,
            UploadFailure::VideoUnavailable(_) => VIDEO_UNAVAILABLE_MESSAGE,
            UploadFailure::Indexing(_) => SERVER_ERROR_MESSAGE,
        }
    }
}

/// Why a question went unanswered.
#[derive(Debug)]
pub struct AskFailure(pub QaError);

/// Shared application context, built once at start-up.
pub struct TranscriptService {
    source: Arc<dyn TranscriptSource>,
    chunker: RecursiveChunker,
    collection: Collection,
    rag: RagEngine,
    languages: Vec<String>,
}

impl TranscriptService {
    /// Assemble a service from explicit components.
    pub fn new(
        source: Arc<dyn TranscriptSource>,
        chunker: RecursiveChunker,
        collection: Collection,
        rag: RagEngine,
        languages: Vec<String>,
    ) -> Self {
        Self {
            source,
            chunker,
            collection,
            rag,
            languages,
        }
    }

    /// Build the production service: YouTube captions, provider-backed
    /// embeddings and chat, and the configured vector store.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = create_client(&settings.provider)?;

        let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::new(
            client.clone(),
            &settings.provider.embedding_model,
            settings.provider.embedding_dimensions,
        ));
        let generator: Arc<dyn Generator> = Arc::new(OpenAIGenerator::new(
            client,
            &settings.provider.chat_model,
            settings.provider.temperature,
        ));

        let collection_name = &settings.vector_store.collection_name;
        let store: Arc<dyn VectorStore> = match settings.vector_store.provider.as_str() {
            "sqlite" => Arc::new(SqliteVectorStore::open(
                &settings.persist_directory(),
                collection_name,
            )?),
            "memory" => Arc::new(MemoryVectorStore::new(collection_name)),
            other => {
                return Err(QaError::Config(format!(
                    "Unknown vector store provider: {}",
                    other
                )))
            }
        };

        let collection = Collection::new(store, embedder);
        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
        let rag = RagEngine::new(collection.clone(), generator)
            .with_top_k(settings.rag.top_k)
            .with_prompts(prompts);

        let chunker = RecursiveChunker::new(ChunkingConfig::from(&settings.chunking))?;
        let source = Arc::new(YoutubeTranscriptSource::new(Duration::from_secs(
            settings.transcript.timeout_seconds,
        ))?);

        info!(
            "Service ready (store: {}, collection: {})",
            settings.vector_store.provider, collection_name
        );

        Ok(Self::new(
            source,
            chunker,
            collection,
            rag,
            settings.transcript.languages.clone(),
        ))
    }

    /// Fetch a video's transcript, chunk it and append the chunks.
    #[instrument(skip(self))]
    pub async fn upload(&self, video_id: &str) -> std::result::Result<UploadReceipt, UploadFailure> {
        let transcript = self
            .source
            .fetch(video_id, &self.languages)
            .await
            .map_err(UploadFailure::from_fetch)?;

        if transcript.is_empty() {
            return Err(UploadFailure::TranscriptNotFound(QaError::NoTranscriptFound {
                video_id: transcript.video_id,
                languages: self.languages.clone(),
            }));
        }

        let chunks = self.chunker.chunk(&transcript.full_text);

        let chunks_indexed = self
            .collection
            .add(&chunks)
            .await
            .map_err(UploadFailure::Indexing)?;

        Ok(UploadReceipt {
            duration_seconds: transcript.duration_seconds(),
            video_id: transcript.video_id,
            chunks_indexed,
        })
    }

    /// Upload a transcript and report the outcome as a response body.
    pub async fn upload_transcript(&self, video_id: &str) -> TranscriptUploadResponse {
        match self.upload(video_id).await {
            Ok(receipt) => {
                info!(
                    "Indexed {} chunks for video {} ({:.0}s of captions)",
                    receipt.chunks_indexed, receipt.video_id, receipt.duration_seconds
                );
                TranscriptUploadResponse {
                    message: UPLOAD_SUCCESS_MESSAGE.to_string(),
                    status: 201,
                    success: true,
                }
            }
            Err(failure) => {
                match &failure {
                    UploadFailure::Indexing(e) => error!("Upload of {} failed: {}", video_id, e),
                    other => warn!("Upload of {} rejected: {}", video_id, other.error()),
                }
                TranscriptUploadResponse {
                    message: failure.message().to_string(),
                    status: failure.status(),
                    success: false,
                }
            }
        }
    }

    /// Answer a question from the indexed transcripts.
    pub async fn ask(&self, question: &str) -> std::result::Result<String, AskFailure> {
        self.rag.answer(question).await.map_err(AskFailure)
    }

    /// Answer a question and report the outcome as a response body.
    pub async fn ask_question(&self, question: &str) -> QuestionResponse {
        match self.ask(question).await {
            Ok(answer) => QuestionResponse {
                message: ANSWER_SUCCESS_MESSAGE.to_string(),
                status: 200,
                success: true,
                data: answer,
            },
            Err(AskFailure(e)) => {
                error!("Question failed: {}", e);
                QuestionResponse {
                    message: SERVER_ERROR_MESSAGE.to_string(),
                    status: 500,
                    success: false,
                    data: String::new(),
                }
            }
        }
    }

    /// Number of chunks stored in the collection.
    pub async fn document_count(&self) -> Result<usize> {
        self.collection.document_count().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::testing::{
        FailingEmbedder, FakeVideo, ScriptedGenerator, StaticTranscriptSource, WordEmbedder,
    };

    pub(crate) fn test_service(
        source: StaticTranscriptSource,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> TranscriptService {
        let collection = Collection::new(Arc::new(MemoryVectorStore::new("test")), embedder);
        let rag = RagEngine::new(collection.clone(), generator);
        let chunker = RecursiveChunker::new(ChunkingConfig::default()).unwrap();
        TranscriptService::new(
            Arc::new(source),
            chunker,
            collection,
            rag,
            vec!["en".to_string()],
        )
    }

    fn source() -> StaticTranscriptSource {
        StaticTranscriptSource::default()
            .with_video(
                "capital0001",
                FakeVideo::Captions(vec![
                    "Welcome to the geography show.",
                    "The capital of Test Country is Testville.",
                    "Thanks for watching.",
                ]),
            )
            .with_video("disabled001", FakeVideo::Disabled)
            .with_video("gone0000001", FakeVideo::Unavailable)
            .with_video("silent00001", FakeVideo::Captions(vec![]))
    }

    fn service() -> TranscriptService {
        test_service(
            source(),
            Arc::new(WordEmbedder::default()),
            Arc::new(ScriptedGenerator::testville()),
        )
    }

    #[tokio::test]
    async fn test_upload_indexes_chunks() {
        let service = service();
        let before = service.document_count().await.unwrap();

        let response = service.upload_transcript("capital0001").await;

        assert_eq!(
            response,
            TranscriptUploadResponse {
                message: UPLOAD_SUCCESS_MESSAGE.to_string(),
                status: 201,
                success: true,
            }
        );
        assert!(service.document_count().await.unwrap() > before);
    }

    #[tokio::test]
    async fn test_upload_disabled_transcript() {
        let service = service();
        let response = service.upload_transcript("disabled001").await;

        assert_eq!(response.status, 404);
        assert!(!response.success);
        assert_eq!(response.message, TRANSCRIPT_NOT_FOUND_MESSAGE);
        assert_eq!(service.document_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upload_empty_transcript_is_not_found() {
        let service = service();

        let failure = service.upload("silent00001").await.unwrap_err();
        assert!(matches!(failure, UploadFailure::TranscriptNotFound(_)));

        let response = service.upload_transcript("silent00001").await;
        assert_eq!(response.status, 404);
        assert_eq!(response.message, TRANSCRIPT_NOT_FOUND_MESSAGE);
        assert_eq!(service.document_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upload_receipt_reports_caption_duration() {
        let receipt = service().upload("capital0001").await.unwrap();

        assert_eq!(receipt.video_id, "capital0001");
        assert_eq!(receipt.chunks_indexed, 1);
        assert_eq!(receipt.duration_seconds, 6.0);
    }

    #[tokio::test]
    async fn test_upload_unavailable_video() {
        let service = service();

        let response = service.upload_transcript("gone0000001").await;
        assert_eq!(response.status, 404);
        assert_eq!(response.message, VIDEO_UNAVAILABLE_MESSAGE);

        let response = service.upload_transcript("unknown0001").await;
        assert_eq!(response.message, VIDEO_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_reupload_appends_duplicates() {
        let service = service();

        let first = service.upload("capital0001").await.unwrap();
        let after_first = service.document_count().await.unwrap();
        let second = service.upload("capital0001").await.unwrap();

        assert_eq!(first.chunks_indexed, second.chunks_indexed);
        assert_eq!(service.document_count().await.unwrap(), after_first * 2);
    }

    #[tokio::test]
    async fn test_indexing_failure_is_server_error() {
        let service = test_service(
            source(),
            Arc::new(FailingEmbedder),
            Arc::new(ScriptedGenerator::testville()),
        );

        let failure = service.upload("capital0001").await.unwrap_err();
        assert!(matches!(failure, UploadFailure::Indexing(_)));

        let response = service.upload_transcript("capital0001").await;
        assert_eq!(response.status, 500);
        assert_eq!(response.message, SERVER_ERROR_MESSAGE);
        assert!(!response.success);
    }

    #[tokio::test]
    async fn test_ask_empty_store() {
        let service = service();
        let response = service.ask_question("What is this video about?").await;

        assert_eq!(response.status, 200);
        assert!(response.success);
        assert_eq!(response.message, ANSWER_SUCCESS_MESSAGE);
        assert_eq!(response.data, "I do not have knowledge about this.");
    }

    #[tokio::test]
    async fn test_upload_then_ask_round_trip() {
        let service = service();
        service.upload("capital0001").await.unwrap();

        let response = service
            .ask_question("What is the capital of Test Country?")
            .await;

        assert_eq!(response.status, 200);
        assert!(response.data.contains("Testville"));
    }

    #[tokio::test]
    async fn test_ask_provider_failure() {
        let service = test_service(
            source(),
            Arc::new(WordEmbedder::default()),
            Arc::new(ScriptedGenerator::unreachable()),
        );

        let response = service.ask_question("Anything?").await;
        assert_eq!(
            response,
            QuestionResponse {
                message: SERVER_ERROR_MESSAGE.to_string(),
                status: 500,
                success: false,
                data: String::new(),
            }
        );
    }

    #[test]
    fn test_from_settings_requires_api_key() {
        let mut settings = Settings::default();
        settings.provider.api_key = None;
        settings.vector_store.provider = "memory".to_string();

        let result = TranscriptService::from_settings(&settings);
        assert!(matches!(result, Err(QaError::Config(_))));
    }

    #[test]
    fn test_from_settings_rejects_unknown_store() {
        let mut settings = Settings::default();
        settings.provider.api_key = Some("test-key".to_string());
        settings.vector_store.provider = "pinecone".to_string();

        let result = TranscriptService::from_settings(&settings);
        assert!(matches!(result, Err(QaError::Config(_))));
    }
}
