//! Stats command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::vector_store::{MemoryVectorStore, SqliteVectorStore, VectorStore};
use anyhow::Result;

/// Show what the configured vector store holds.
///
/// Opens the store directly so no provider key is needed.
pub async fn run_stats(settings: Settings) -> Result<()> {
    let collection = &settings.vector_store.collection_name;

    let store: Box<dyn VectorStore> = match settings.vector_store.provider.as_str() {
        "sqlite" => Box::new(SqliteVectorStore::open(
            &settings.persist_directory(),
            collection,
        )?),
        "memory" => {
            Output::warning("The memory store does not persist between runs.");
            Box::new(MemoryVectorStore::new(collection))
        }
        other => anyhow::bail!("Unknown vector store provider: {}", other),
    };

    Output::header("Vector Store");
    Output::kv("Provider", &settings.vector_store.provider);
    Output::kv("Location", &settings.persist_directory().display().to_string());
    Output::kv("Collection", store.collection_name());
    Output::kv("Chunks", &store.document_count().await?.to_string());

    Ok(())
}
