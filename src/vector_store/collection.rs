//! A vector store bound to the embedder that fills it.

use super::{Document, SearchResult, VectorStore};
use crate::chunking::TextChunk;
use crate::embedding::Embedder;
use crate::error::{QaError, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Text-level view of a vector store: callers hand in text, the collection
/// takes care of embeddings.
#[derive(Clone)]
pub struct Collection {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
}

impl Collection {
    pub fn new(store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self { store, embedder }
    }

    pub fn name(&self) -> &str {
        self.store.collection_name()
    }

    /// Embed chunks in one batch and append them to the store.
    #[instrument(skip(self, chunks), fields(collection = %self.name(), count = chunks.len()))]
    pub async fn add(&self, chunks: &[TextChunk]) -> Result<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(QaError::Embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let documents: Vec<Document> = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| Document::new(chunk.content.clone(), embedding, chunk.order))
            .collect();

        let count = self.store.append(&documents).await?;
        info!("Added {} chunks to collection {}", count, self.name());
        Ok(count)
    }

    /// Return the `k` chunks closest to `query`, nearest first.
    #[instrument(skip(self, query), fields(collection = %self.name()))]
    pub async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = self.store.search(&query_embedding, k).await?;
        debug!("Retrieved {} chunks", results.len());
        Ok(results)
    }

    pub async fn document_count(&self) -> Result<usize> {
        self.store.document_count().await
    }
}
