//! OpenAI-compatible client configuration.

use crate::config::ProviderSettings;
use crate::error::{QaError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Shared client type for embeddings and chat completions.
pub type ProviderClient = Client<OpenAIConfig>;

/// Create a provider client from settings.
///
/// Fails when no API key is configured.
pub fn create_client(settings: &ProviderSettings) -> Result<ProviderClient> {
    let api_key = settings
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            QaError::Config(
                "No provider API key configured. Set GOOGLE_API_KEY or provider.api_key."
                    .to_string(),
            )
        })?;

    create_client_with(
        api_key,
        &settings.api_base,
        Duration::from_secs(settings.timeout_seconds),
    )
}

/// Create a provider client for an explicit endpoint and timeout.
pub fn create_client_with(api_key: &str, api_base: &str, timeout: Duration) -> Result<ProviderClient> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| QaError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new()
        .with_api_key(api_key)
        .with_api_base(api_base.trim_end_matches('/'));

    Ok(Client::with_config(config).with_http_client(http_client))
}
