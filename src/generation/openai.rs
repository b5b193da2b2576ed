//! OpenAI-compatible chat completion implementation.

use super::Generator;
use crate::error::{QaError, Result};
use crate::openai::ProviderClient;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Generator backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAIGenerator {
    client: ProviderClient,
    model: String,
    temperature: f32,
}

impl OpenAIGenerator {
    pub fn new(client: ProviderClient, model: &str, temperature: f32) -> Self {
        Self {
            client,
            model: model.to_string(),
            temperature,
        }
    }
}

#[async_trait]
impl Generator for OpenAIGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        // The rendered template goes out as a single user turn.
        let messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| QaError::Generation(e.to_string()))?
                .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| QaError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| QaError::OpenAI(format!("Failed to generate response: {}", e)))?;

        let answer = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| QaError::Generation("Empty response from LLM".to_string()))?;

        debug!("Generated answer of {} chars", answer.len());
        Ok(answer)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::create_client_with;
    use std::time::Duration;

    #[tokio::test]
    async fn test_unreachable_provider_errors() {
        let client =
            create_client_with("key", "http://127.0.0.1:9/v1", Duration::from_secs(1)).unwrap();
        let generator = OpenAIGenerator::new(client, "gemini-2.5-flash", 0.7);

        let err = generator.generate("Question: anything?").await.unwrap_err();
        assert!(matches!(err, QaError::OpenAI(_)));
        assert_eq!(generator.model(), "gemini-2.5-flash");
    }
}
