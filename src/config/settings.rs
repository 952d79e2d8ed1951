//! Non-sensitive configuration, loaded from `config.toml`.
//!
//! API keys never live here — they go through the encrypted credential
//! store.  Every field has a default so Glossa works without a config
//! file at all.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{GlossaError, Result};
use crate::provider::Provider;

/// How literal the translation should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStyle {
    #[default]
    Balanced,
    Literal,
    Natural,
}

impl TranslationStyle {
    /// Extra instruction appended to the system prompt, if any.
    pub fn prompt_hint(&self) -> Option<&'static str> {
        match self {
            TranslationStyle::Balanced => None,
            TranslationStyle::Literal => {
                Some("Prefer a literal translation that stays close to the source wording.")
            }
            TranslationStyle::Natural => {
                Some("Prefer a natural translation that reads fluently in the target language.")
            }
        }
    }
}

impl fmt::Display for TranslationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TranslationStyle::Balanced => "balanced",
            TranslationStyle::Literal => "literal",
            TranslationStyle::Natural => "natural",
        };
        f.write_str(s)
    }
}

impl FromStr for TranslationStyle {
    type Err = GlossaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "balanced" => Ok(TranslationStyle::Balanced),
            "literal" => Ok(TranslationStyle::Literal),
            "natural" => Ok(TranslationStyle::Natural),
            other => Err(GlossaError::CommandFailed(format!(
                "unknown style '{other}' — supported: balanced, literal, natural"
            ))),
        }
    }
}

/// User configuration, persisted as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Primary target language.
    #[serde(default = "default_first_language")]
    pub first_language: String,

    /// Fallback target when the text is already in the first language.
    #[serde(default = "default_second_language")]
    pub second_language: String,

    /// Provider API endpoint.  Empty until configured.
    #[serde(default)]
    pub api_endpoint: String,

    /// Model name.  Empty means "use the provider's default".
    #[serde(default)]
    pub api_model: String,

    /// Translation style hint.
    #[serde(default)]
    pub translation_style: TranslationStyle,

    /// Explicit provider override.  When set, endpoint detection is
    /// skipped entirely — this is the escape hatch for endpoints the
    /// substring heuristic misclassifies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_first_language() -> String {
    "Japanese".to_string()
}

fn default_second_language() -> String {
    "English".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            first_language: default_first_language(),
            second_language: default_second_language(),
            api_endpoint: String::new(),
            api_model: String::new(),
            translation_style: TranslationStyle::default(),
            provider: None,
        }
    }
}

impl Settings {
    /// Name of the config file inside the config directory.
    pub const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<config_dir>/config.toml`.
    ///
    /// If the file does not exist, defaults are returned.  If the file
    /// exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            GlossaError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Write settings to `<config_dir>/config.toml`.
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(config_dir)?;

        let contents = toml::to_string_pretty(self)
            .map_err(|e| GlossaError::SerializationError(format!("config: {e}")))?;

        std::fs::write(config_dir.join(Self::FILE_NAME), contents)?;
        Ok(())
    }

    /// The provider to use: the explicit override if set, otherwise
    /// whatever the endpoint heuristic detects.
    pub fn resolved_provider(&self) -> Provider {
        self.provider
            .unwrap_or_else(|| Provider::detect(&self.api_endpoint))
    }

    /// The model to request: the configured one, or the resolved
    /// provider's default when none is configured.
    pub fn model(&self) -> &str {
        if self.api_model.is_empty() {
            self.resolved_provider().default_model()
        } else {
            &self.api_model
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.first_language, "Japanese");
        assert_eq!(s.second_language, "English");
        assert_eq!(s.api_endpoint, "");
        assert_eq!(s.api_model, "");
        assert_eq!(s.translation_style, TranslationStyle::Balanced);
        assert!(s.provider.is_none());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.first_language, "Japanese");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
first_language = "French"
second_language = "German"
api_endpoint = "https://api.openai.com/v1/chat/completions"
api_model = "gpt-4o-mini"
translation_style = "literal"
provider = "openai"
"#;
        fs::write(tmp.path().join("config.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.first_language, "French");
        assert_eq!(settings.api_model, "gpt-4o-mini");
        assert_eq!(settings.translation_style, TranslationStyle::Literal);
        assert_eq!(settings.provider, Some(Provider::OpenAi));
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "first_language = \"Korean\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.first_language, "Korean");
        assert_eq!(settings.second_language, "English");
        assert!(settings.provider.is_none());
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "not valid {{toml").unwrap();
        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings {
            api_endpoint: "http://localhost:11434/api/chat".into(),
            api_model: "llama3".into(),
            provider: Some(Provider::Ollama),
            ..Settings::default()
        };
        settings.save(tmp.path()).unwrap();

        let loaded = Settings::load(tmp.path()).unwrap();
        assert_eq!(loaded.api_endpoint, settings.api_endpoint);
        assert_eq!(loaded.api_model, "llama3");
        assert_eq!(loaded.provider, Some(Provider::Ollama));
    }

    #[test]
    fn resolved_provider_prefers_the_override() {
        let settings = Settings {
            // An endpoint the heuristic would misread as Ollama.
            api_endpoint: "https://proxy.example.com/api/chat".into(),
            provider: Some(Provider::OpenAi),
            ..Settings::default()
        };
        assert_eq!(settings.resolved_provider(), Provider::OpenAi);
    }

    #[test]
    fn resolved_provider_falls_back_to_detection() {
        let settings = Settings {
            api_endpoint: "https://api.anthropic.com/v1/messages".into(),
            ..Settings::default()
        };
        assert_eq!(settings.resolved_provider(), Provider::Claude);
    }

    #[test]
    fn model_falls_back_to_provider_default() {
        let mut settings = Settings {
            api_endpoint: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            ..Settings::default()
        };
        assert_eq!(settings.model(), "gemini-pro");

        settings.api_model = "gemini-1.5-flash".into();
        assert_eq!(settings.model(), "gemini-1.5-flash");
    }

    #[test]
    fn style_hints() {
        assert!(TranslationStyle::Balanced.prompt_hint().is_none());
        assert!(TranslationStyle::Literal.prompt_hint().is_some());
        assert!(TranslationStyle::Natural.prompt_hint().is_some());
    }
}
