//! Translation dispatch.
//!
//! One HTTP request per translation, in the shape the resolved
//! provider expects.  No retry, backoff, queuing, or timeouts — a
//! failure is either a misconfiguration or a provider-side condition
//! the user has to act on, and neither benefits from retrying.

use ureq::Agent;

use crate::config::Settings;
use crate::errors::{GlossaError, Result};
use crate::provider::Provider;

use super::wire::{
    ChatMessage, ClaudeRequest, ClaudeResponse, GeminiContent, GeminiGenerationConfig, GeminiPart,
    GeminiRequest, GeminiResponse, OllamaOptions, OllamaRequest, OllamaResponse, OpenAiErrorBody,
    OpenAiRequest, OpenAiResponse,
};

/// Instruction the model receives before the text to translate.
const SYSTEM_PROMPT: &str = "You are a translator. Detect the source language and translate the \
     text accurately. Return ONLY the translated text itself. Do not include any labels, source \
     language names, explanations, or any other text besides the translation.";

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 500;

/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The translation client.  Holds the HTTP agent and borrows the
/// settings it dispatches with.
pub struct Translator<'a> {
    agent: Agent,
    settings: &'a Settings,
}

impl<'a> Translator<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        // Non-2xx responses carry provider error details we want to
        // read, so status errors are handled manually.
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent, settings }
    }

    /// Translate `text` using the configured provider.
    ///
    /// The caller is responsible for fetching `api_key` from the
    /// credential store first; this method never reads storage.
    pub fn translate(&self, text: &str, api_key: &str) -> Result<String> {
        if self.settings.api_endpoint.is_empty() {
            return Err(GlossaError::NotConfigured);
        }

        let (system, user) = build_prompt(self.settings, text);

        match self.settings.resolved_provider() {
            Provider::Gemini => self.call_gemini(&system, &user, api_key),
            Provider::Claude => self.call_claude(&system, &user, api_key),
            Provider::Ollama => self.call_ollama(&system, &user),
            Provider::OpenAi | Provider::Custom => self.call_openai(&system, &user, api_key),
        }
    }

    // ------------------------------------------------------------------
    // Per-provider call shapes
    // ------------------------------------------------------------------

    fn call_openai(&self, system: &str, user: &str, api_key: &str) -> Result<String> {
        let messages = [
            ChatMessage {
                role: "system",
                content: system.to_string(),
            },
            ChatMessage {
                role: "user",
                content: user.to_string(),
            },
        ];

        let body = OpenAiRequest {
            model: self.settings.model(),
            messages: &messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let mut response = self
            .agent
            .post(&self.settings.api_endpoint)
            .header("Authorization", format!("Bearer {api_key}"))
            .send_json(&body)
            .map_err(|e| GlossaError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body: OpenAiErrorBody = response.body_mut().read_json().unwrap_or_default();
            return Err(map_openai_error(status, &body));
        }

        let parsed: OpenAiResponse = response
            .body_mut()
            .read_json()
            .map_err(|_| GlossaError::InvalidResponse)?;

        parsed.into_text().ok_or(GlossaError::InvalidResponse)
    }

    fn call_gemini(&self, system: &str, user: &str, api_key: &str) -> Result<String> {
        // Gemini takes one flattened prompt instead of a message list.
        let prompt = format!("system: {system}\nuser: {user}");

        let url = format!(
            "{}/{}:generateContent?key={api_key}",
            self.settings.api_endpoint.trim_end_matches('/'),
            self.settings.model(),
        );

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_TOKENS,
            },
        };

        let mut response = self
            .agent
            .post(&url)
            .send_json(&body)
            .map_err(|e| GlossaError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let text = response.body_mut().read_to_string().unwrap_or_default();
            return Err(GlossaError::Api(format!(
                "Gemini API error ({status}): {text}"
            )));
        }

        let parsed: GeminiResponse = response
            .body_mut()
            .read_json()
            .map_err(|_| GlossaError::InvalidResponse)?;

        parsed.into_text().ok_or(GlossaError::InvalidResponse)
    }

    fn call_claude(&self, system: &str, user: &str, api_key: &str) -> Result<String> {
        // Claude takes the system prompt as a top-level field; the
        // message list carries only the user turn.
        let messages = [ChatMessage {
            role: "user",
            content: user.to_string(),
        }];

        let body = ClaudeRequest {
            model: self.settings.model(),
            system,
            messages: &messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let mut response = self
            .agent
            .post(&self.settings.api_endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .send_json(&body)
            .map_err(|e| GlossaError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(match status {
                401 | 403 => GlossaError::AuthFailed,
                429 => GlossaError::RateLimited(String::new()),
                _ => {
                    let text = response.body_mut().read_to_string().unwrap_or_default();
                    GlossaError::Api(format!("Claude API error ({status}): {text}"))
                }
            });
        }

        let parsed: ClaudeResponse = response
            .body_mut()
            .read_json()
            .map_err(|_| GlossaError::InvalidResponse)?;

        parsed.into_text().ok_or(GlossaError::InvalidResponse)
    }

    fn call_ollama(&self, system: &str, user: &str) -> Result<String> {
        // Local API; the stored credential gates dispatch but the
        // request itself is unauthenticated.
        let messages = [
            ChatMessage {
                role: "system",
                content: system.to_string(),
            },
            ChatMessage {
                role: "user",
                content: user.to_string(),
            },
        ];

        let body = OllamaRequest {
            model: self.settings.model(),
            messages: &messages,
            stream: false,
            options: OllamaOptions {
                temperature: TEMPERATURE,
            },
        };

        let mut response = self
            .agent
            .post(&self.settings.api_endpoint)
            .send_json(&body)
            .map_err(|e| GlossaError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let text = response.body_mut().read_to_string().unwrap_or_default();
            return Err(GlossaError::Api(format!(
                "Ollama API error ({status}): {text}"
            )));
        }

        let parsed: OllamaResponse = response
            .body_mut()
            .read_json()
            .map_err(|_| GlossaError::InvalidResponse)?;

        parsed.into_text().ok_or(GlossaError::InvalidResponse)
    }
}

/// Build the system and user prompts for a translation request.
fn build_prompt(settings: &Settings, text: &str) -> (String, String) {
    let mut system = SYSTEM_PROMPT.to_string();
    if let Some(hint) = settings.translation_style.prompt_hint() {
        system.push(' ');
        system.push_str(hint);
    }

    let user = format!(
        "Translate the following text to {first} (or to {second} if the text is already in {first}):\n\n{text}",
        first = settings.first_language,
        second = settings.second_language,
    );

    (system, user)
}

/// Map an OpenAI-shaped error response to the error taxonomy.
fn map_openai_error(status: u16, body: &OpenAiErrorBody) -> GlossaError {
    if let Some(detail) = &body.error {
        let message = detail.message.clone().unwrap_or_default();
        match detail.code.as_deref() {
            Some("rate_limit_exceeded") => return GlossaError::RateLimited(format!(" {message}")),
            Some("insufficient_quota") => return GlossaError::InsufficientQuota,
            Some("invalid_api_key") => return GlossaError::AuthFailed,
            Some(code) => {
                return GlossaError::Api(if message.is_empty() {
                    code.to_string()
                } else {
                    message
                })
            }
            None if !message.is_empty() => return GlossaError::Api(message),
            None => {}
        }
    }

    match status {
        401 => GlossaError::AuthFailed,
        429 => GlossaError::RateLimited(String::new()),
        _ => GlossaError::Api(format!("request failed with status {status}")),
    }
}
