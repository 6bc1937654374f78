//! Google Gemini adapter.
//!
//! Calls `POST {base_url}/v1beta/models/{model}:generateContent` with the key
//! in the `x-goog-api-key` header, so it never appears in URLs or logs.

use async_trait::async_trait;
use serde::Deserialize;

use super::error::{extract_error_message, LlmError};
use super::usage::TokenUsage;
use super::{build_client, Completion, LanguageModel};

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for the Gemini adapter.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL (defaults to [`DEFAULT_BASE_URL`]).
    pub base_url: String,
    /// The model to use.
    pub model: String,
    /// Optional request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl GeminiConfig {
    /// Create a new config with the given API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: model.into(),
            timeout_seconds: None,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Build the JSON request body for a single-turn prompt.
pub fn build_request(prompt: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [
            { "role": "user", "parts": [ { "text": prompt } ] }
        ]
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

/// Parse a `generateContent` response body into a [`Completion`].
///
/// # Errors
///
/// Returns [`LlmError::ProviderError`] if the body is malformed or the first
/// candidate carries no text.
pub fn parse_response(body: &str) -> Result<Completion, LlmError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::ProviderError(format!("Gemini returned malformed JSON: {e}")))?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LlmError::ProviderError(
            "Gemini response contained no candidate text".into(),
        ));
    }

    let usage = parsed
        .usage_metadata
        .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count));

    Ok(Completion { text, usage })
}

/// Gemini provider adapter.
pub struct GeminiAdapter {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdapter")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl GeminiAdapter {
    /// Create a new Gemini adapter.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigError`] if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        let client = build_client(config.timeout_seconds)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl LanguageModel for GeminiAdapter {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<Completion, LlmError> {
        tracing::debug!(model = %self.config.model, "sending Gemini request");

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&build_request(prompt))
            .send()
            .await
            .map_err(|e| LlmError::from_transport("Gemini", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::from_transport("Gemini", e))?;

        if !status.is_success() {
            return Err(LlmError::from_status(
                "Gemini",
                status,
                &extract_error_message(&body),
            ));
        }

        parse_response(&body)
    }
}
