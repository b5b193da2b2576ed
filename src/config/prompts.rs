//! Prompt templates for transcript-qa.
//!
//! The answer template can be replaced by placing a `rag.toml` file in the
//! custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub rag: RagPrompts,
}

/// Prompt for answer generation.
///
/// Placeholders are written as `{name}`; `{context}` and `{question}` are
/// always provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagPrompts {
    pub template: String,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self {
            template: r#"You are a helpful assistant.
Answer ONLY from the provided transcript context.
If the context is insufficient, just say I do not have knowledge about this.

{context}
Question:{question}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, overriding defaults from an optional custom directory.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let rag_path = custom_path.join("rag.toml");
            if rag_path.exists() {
                let content = std::fs::read_to_string(&rag_path)?;
                prompts.rag = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a template in a single pass.
    ///
    /// Substituted values are not scanned again, so a transcript containing
    /// `{question}` stays literal. Unknown placeholders are left untouched.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            match after.find('}') {
                Some(close) if Self::is_placeholder(&after[..close]) => {
                    let name = &after[..close];
                    match vars.get(name) {
                        Some(value) => result.push_str(value),
                        None => {
                            result.push('{');
                            result.push_str(name);
                            result.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                _ => {
                    result.push('{');
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        result
    }

    fn is_placeholder(name: &str) -> bool {
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_prompt_has_placeholders() {
        let prompts = Prompts::default();
        assert!(prompts.rag.template.contains("{context}"));
        assert!(prompts.rag.template.contains("{question}"));
        assert!(prompts.rag.template.contains("Answer ONLY"));
        assert!(prompts
            .rag
            .template
            .contains("If the context is insufficient, just say I do not have knowledge about this."));
    }

    #[test]
    fn test_render_template() {
        let result = Prompts::render(
            "Hello {name}, you have {count} messages.",
            &vars(&[("name", "Alice"), ("count", "5")]),
        );
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let result = Prompts::render(
            "{context}\nQuestion:{question}",
            &vars(&[("context", "he said {question} twice"), ("question", "why?")]),
        );
        assert_eq!(result, "he said {question} twice\nQuestion:why?");
    }

    #[test]
    fn test_render_leaves_unknown_and_stray_braces() {
        let result = Prompts::render("{unknown} { not } {a-b} {", &vars(&[]));
        assert_eq!(result, "{unknown} { not } {a-b} {");
    }

    #[test]
    fn test_load_custom_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rag.toml"),
            "template = \"Context: {context}\\nQ: {question}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str()).unwrap();
        assert_eq!(prompts.rag.template, "Context: {context}\nQ: {question}");
    }
}
