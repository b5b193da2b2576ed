//! Configuration settings for transcript-qa.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub provider: ProviderSettings,
    pub chunking: ChunkingSettings,
    pub vector_store: VectorStoreSettings,
    pub transcript: TranscriptSettings,
    pub rag: RagSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Application name, shown by the server banner.
    pub app_name: String,
    /// Enables debug logging.
    pub debug: bool,
    /// Error-reporting endpoint (optional).
    pub sentry_dsn: Option<String>,
    /// Origins allowed by CORS. `*` allows any origin.
    pub allowed_hosts: Vec<String>,
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            app_name: "TranscriptApplication".to_string(),
            debug: false,
            sentry_dsn: None,
            allowed_hosts: vec!["*".to_string()],
            data_dir: "~/.transcript-qa".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Embedding and generation provider settings.
///
/// Any OpenAI-compatible endpoint works; the default points at the Gemini
/// OpenAI compatibility layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API key for the provider.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API.
    pub api_base: String,
    /// Embedding model to use.
    pub embedding_model: String,
    /// Requested embedding dimensions (None = model default).
    pub embedding_dimensions: Option<u32>,
    /// Chat model used to generate answers.
    pub chat_model: String,
    /// Sampling temperature for answers.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            embedding_model: "gemini-embedding-001".to_string(),
            embedding_dimensions: None,
            chat_model: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
            timeout_seconds: 300,
        }
    }
}

/// Text chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between neighbouring chunks.
    pub chunk_overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Vector store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreSettings {
    /// Vector store provider (sqlite, memory).
    pub provider: String,
    /// Directory holding the persisted collection data.
    pub persist_directory: String,
    /// Name of the collection every chunk is written to.
    pub collection_name: String,
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            provider: "sqlite".to_string(),
            persist_directory: "~/.transcript-qa/vector_db".to_string(),
            collection_name: "vectorembeddingstore".to_string(),
        }
    }
}

/// Transcript fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Preferred caption languages, in priority order.
    pub languages: Vec<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            timeout_seconds: 30,
        }
    }
}

/// Answering pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// Number of chunks retrieved per question.
    pub top_k: usize,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Environment overrides are applied on top of the file contents.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply environment overrides using the given lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GOOGLE_API_KEY").filter(|k| !k.is_empty()) {
            self.provider.api_key = Some(key);
        }
        if let Some(name) = lookup("APP_NAME") {
            self.general.app_name = name;
        }
        if let Some(debug) = lookup("DEBUG") {
            self.general.debug = matches!(
                debug.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        // SENTRY_DNS is the spelling older .env files use.
        if let Some(dsn) = ["SENTRY_DSN", "SENTRY_DNS"]
            .into_iter()
            .find_map(|key| lookup(key).filter(|d| !d.is_empty()))
        {
            self.general.sentry_dsn = Some(dsn);
        }
        if let Some(hosts) = lookup("ALLOWED_HOSTS") {
            let hosts: Vec<String> = hosts
                .split(',')
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect();
            if !hosts.is_empty() {
                self.general.allowed_hosts = hosts;
            }
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::QaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("transcript-qa")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded vector store directory.
    pub fn persist_directory(&self) -> PathBuf {
        Self::expand_path(&self.vector_store.persist_directory)
    }

    /// Effective log level, honouring the debug flag.
    pub fn effective_log_level(&self) -> &str {
        if self.general.debug {
            "debug"
        } else {
            &self.general.log_level
        }
    }
}
