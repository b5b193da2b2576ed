//! RAG answer generation.

use super::{context::format_context_for_prompt, ContextChunk};
use crate::config::Prompts;
use crate::error::Result;
use crate::generation::Generator;
use crate::vector_store::Collection;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Number of chunks retrieved per question unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 4;

/// RAG engine for question answering.
pub struct RagEngine {
    collection: Collection,
    generator: Arc<dyn Generator>,
    prompts: Prompts,
    top_k: usize,
}

impl RagEngine {
    /// Create a new RAG engine with the default prompt and `top_k`.
    pub fn new(collection: Collection, generator: Arc<dyn Generator>) -> Self {
        Self {
            collection,
            generator,
            prompts: Prompts::default(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the number of retrieved chunks.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Render the answer prompt for a question and its context.
    pub fn build_prompt(&self, question: &str, context: &[ContextChunk]) -> String {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), format_context_for_prompt(context));
        vars.insert("question".to_string(), question.to_string());

        Prompts::render(&self.prompts.rag.template, &vars)
    }

    /// Answer a question, returning only the generated text.
    pub async fn answer(&self, question: &str) -> Result<String> {
        Ok(self.ask(question).await?.answer)
    }

    /// Ask a question and get the answer together with its sources.
    ///
    /// An empty collection still reaches the model, which is instructed to
    /// decline when the context is insufficient.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn ask(&self, question: &str) -> Result<RagResponse> {
        info!("Processing question: {}", question);

        let sources: Vec<ContextChunk> = self
            .collection
            .similarity_search(question, self.top_k)
            .await?
            .into_iter()
            .map(ContextChunk::from)
            .collect();

        let prompt = self.build_prompt(question, &sources);
        let answer = self.generator.generate(&prompt).await?;

        debug!("Generated response with {} sources", sources.len());

        Ok(RagResponse { answer, sources })
    }
}

/// A RAG response with answer and sources.
#[derive(Debug, Clone)]
pub struct RagResponse {
    /// The generated answer.
    pub answer: String,
    /// Chunks the answer was generated from.
    pub sources: Vec<ContextChunk>,
}
