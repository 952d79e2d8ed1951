//! Request and response shapes for the provider APIs.
//!
//! Four near-identical HTTP call shapes; only the fields each API
//! actually reads or returns are modeled, everything else is ignored
//! on deserialization.

use serde::{Deserialize, Serialize};

/// One chat message in the OpenAI-style shape.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

// ---------------------------------------------------------------------------
// OpenAI-compatible (also used for custom endpoints)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct OpenAiRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiResponse {
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiChoice {
    #[serde(default)]
    pub message: Option<OpenAiChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiChoiceMessage {
    #[serde(default)]
    pub content: String,
}

impl OpenAiResponse {
    /// The answer text, if the response actually carries one.
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .map(|m| m.content)
            .filter(|c| !c.is_empty())
    }
}

/// Error body shape: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Default, Deserialize)]
pub struct OpenAiErrorBody {
    #[serde(default)]
    pub error: Option<OpenAiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidateContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

impl GeminiResponse {
    pub fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Claude
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ClaudeRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ClaudeResponse {
    #[serde(default)]
    pub content: Vec<ClaudeContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ClaudeContentBlock {
    #[serde(default)]
    pub text: String,
}

impl ClaudeResponse {
    pub fn into_text(self) -> Option<String> {
        self.content
            .into_iter()
            .next()
            .map(|b| b.text)
            .filter(|t| !t.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Ollama
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct OllamaRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
    pub options: OllamaOptions,
}

#[derive(Debug, Serialize)]
pub struct OllamaOptions {
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct OllamaResponse {
    #[serde(default)]
    pub message: Option<OllamaMessage>,
}

#[derive(Debug, Deserialize)]
pub struct OllamaMessage {
    #[serde(default)]
    pub content: String,
}

impl OllamaResponse {
    pub fn into_text(self) -> Option<String> {
        self.message.map(|m| m.content).filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_openai_response() {
        let json = r#"{
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "こんにちは"}}]
        }"#;
        let resp: OpenAiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_text().as_deref(), Some("こんにちは"));
    }

    #[test]
    fn openai_response_without_content_yields_none() {
        let empty: OpenAiResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(empty.into_text().is_none());

        let blank: OpenAiResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": ""}}]}"#).unwrap();
        assert!(blank.into_text().is_none());
    }

    #[test]
    fn parses_openai_error_body() {
        let json = r#"{"error": {"code": "invalid_api_key", "message": "Incorrect API key"}}"#;
        let body: OpenAiErrorBody = serde_json::from_str(json).unwrap();
        let detail = body.error.unwrap();
        assert_eq!(detail.code.as_deref(), Some("invalid_api_key"));
    }

    #[test]
    fn parses_gemini_response() {
        let json = r#"{
            "candidates": [{"content": {"parts": [{"text": "Bonjour"}], "role": "model"}}]
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_text().as_deref(), Some("Bonjour"));
    }

    #[test]
    fn gemini_response_without_candidates_yields_none() {
        let resp: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.into_text().is_none());
    }

    #[test]
    fn parses_claude_response() {
        let json = r#"{"content": [{"type": "text", "text": "Hallo"}], "model": "claude-3-haiku-20240307"}"#;
        let resp: ClaudeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_text().as_deref(), Some("Hallo"));
    }

    #[test]
    fn parses_ollama_response() {
        let json = r#"{"message": {"role": "assistant", "content": "Hola"}, "done": true}"#;
        let resp: OllamaResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_text().as_deref(), Some("Hola"));
    }

    #[test]
    fn gemini_request_uses_camel_case_config() {
        let req = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: "user: hi".into(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: 0.3,
                max_output_tokens: 500,
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("generationConfig").is_some());
        assert!(json["generationConfig"].get("maxOutputTokens").is_some());
    }
}
