//! Provider registry — maps endpoints to provider identifiers and
//! carries per-provider defaults.
//!
//! Detection is a substring heuristic over the configured endpoint,
//! preserved from the original settings flow.  It is best-effort, not
//! authoritative: a self-hosted proxy whose path happens to contain
//! `/api/chat` classifies as Ollama.  Settings can force an explicit
//! provider, which always wins over detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GlossaError;

/// One of the supported translation backends.
///
/// `Custom` is the fallback bucket for unrecognized endpoints; it is
/// spelled `default` in configuration and storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
    Claude,
    Ollama,
    #[serde(rename = "default")]
    Custom,
}

impl Provider {
    /// Every provider, in display order.
    pub const ALL: [Provider; 5] = [
        Provider::OpenAi,
        Provider::Gemini,
        Provider::Claude,
        Provider::Ollama,
        Provider::Custom,
    ];

    /// The stable identifier used in storage keys and configuration.
    pub fn id(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Claude => "claude",
            Provider::Ollama => "ollama",
            Provider::Custom => "default",
        }
    }

    /// Classify an endpoint URL by substring content.
    ///
    /// Unrecognized endpoints (including an empty one) fall through to
    /// the `Custom` bucket.
    pub fn detect(endpoint: &str) -> Provider {
        if endpoint.is_empty() {
            return Provider::Custom;
        }

        if endpoint.contains("openai") {
            Provider::OpenAi
        } else if endpoint.contains("generativelanguage.googleapis.com") {
            Provider::Gemini
        } else if endpoint.contains("anthropic") {
            Provider::Claude
        } else if endpoint.contains("localhost:11434") || endpoint.contains("/api/chat") {
            Provider::Ollama
        } else {
            Provider::Custom
        }
    }

    /// The well-known API endpoint for this provider, if there is one.
    pub fn default_endpoint(&self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("https://api.openai.com/v1/chat/completions"),
            Provider::Gemini => Some("https://generativelanguage.googleapis.com/v1beta/models"),
            Provider::Claude => Some("https://api.anthropic.com/v1/messages"),
            Provider::Ollama => Some("http://localhost:11434/api/chat"),
            Provider::Custom => None,
        }
    }

    /// The model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi | Provider::Custom => "gpt-3.5-turbo",
            Provider::Gemini => "gemini-pro",
            Provider::Claude => "claude-3-haiku-20240307",
            Provider::Ollama => "llama2",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = GlossaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "gemini" => Ok(Provider::Gemini),
            "claude" => Ok(Provider::Claude),
            "ollama" => Ok(Provider::Ollama),
            "default" | "custom" => Ok(Provider::Custom),
            other => Err(GlossaError::CommandFailed(format!(
                "unknown provider '{other}' — supported: openai, gemini, claude, ollama, default"
            ))),
        }
    }
}
