//! In-memory vector store implementation.
//!
//! Useful for testing and throwaway sessions; nothing survives a restart.

use super::{rank, Document, SearchResult, VectorStore};
use crate::error::{QaError, Result};
use async_trait::async_trait;
use std::sync::RwLock;

/// In-memory vector store.
pub struct MemoryVectorStore {
    documents: RwLock<Vec<Document>>,
    collection: String,
}

impl MemoryVectorStore {
    /// Create a new in-memory vector store.
    pub fn new(collection: &str) -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            collection: collection.to_string(),
        }
    }
}

impl Default for MemoryVectorStore {
    fn default() -> Self {
        Self::new("default")
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> QaError {
    QaError::VectorStore(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn append(&self, docs: &[Document]) -> Result<usize> {
        let mut store = self.documents.write().map_err(poisoned)?;
        store.extend_from_slice(docs);
        Ok(docs.len())
    }

    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        let docs = self.documents.read().map_err(poisoned)?;
        Ok(rank(docs.iter().cloned(), query_embedding, limit))
    }

    async fn document_count(&self) -> Result<usize> {
        let docs = self.documents.read().map_err(poisoned)?;
        Ok(docs.len())
    }

    fn collection_name(&self) -> &str {
        &self.collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_vector_store() {
        let store = MemoryVectorStore::new("test");

        let doc1 = Document::new("Hello world".to_string(), vec![1.0, 0.0, 0.0], 0);
        let doc2 = Document::new("Goodbye world".to_string(), vec![0.0, 1.0, 0.0], 1);

        store.append(&[doc1, doc2]).await.unwrap();

        assert_eq!(store.document_count().await.unwrap(), 2);
        assert_eq!(store.collection_name(), "test");

        let results = store.search(&[1.0, 0.0, 0.0], 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].score > results[1].score);
        assert_eq!(results[0].document.content, "Hello world");

        let results = store.search(&[0.0, 1.0, 0.0], 1).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.content, "Goodbye world");
    }

    #[tokio::test]
    async fn test_search_empty_store() {
        let store = MemoryVectorStore::default();
        assert!(store.search(&[1.0], 4).await.unwrap().is_empty());
    }
}
