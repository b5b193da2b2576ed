//! Configuration module for transcript-qa.
//!
//! Handles loading application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, RagPrompts};
pub use settings::{
    ChunkingSettings, GeneralSettings, PromptSettings, ProviderSettings, RagSettings, Settings,
    TranscriptSettings, VectorStoreSettings,
};
