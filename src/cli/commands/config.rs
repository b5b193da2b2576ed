//! Config command implementation.

use crate::cli::ConfigAction;
use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: &Settings, path: Option<&PathBuf>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", render(settings)?);
        }

        ConfigAction::Path => {
            let config_path = path.cloned().unwrap_or_else(Settings::default_config_path);
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Render settings as TOML with the API key masked.
fn render(settings: &Settings) -> Result<String> {
    let mut shown = settings.clone();
    if shown.provider.api_key.is_some() {
        shown.provider.api_key = Some("********".to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_masks_api_key() {
        let mut settings = Settings::default();
        settings.provider.api_key = Some("secret-key".to_string());

        let rendered = render(&settings).unwrap();
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("********"));
        assert!(rendered.contains("vectorembeddingstore"));
    }
}
