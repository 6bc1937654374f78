//! OpenAI-compatible chat completions adapter.
//!
//! Sends a single user message to `POST {base_url}/v1/chat/completions`
//! with `stream: false` and reads `choices[0].message.content`.

use async_trait::async_trait;
use serde::Deserialize;

use super::error::{extract_error_message, LlmError};
use super::usage::TokenUsage;
use super::{build_client, Completion, LanguageModel};

/// Default OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default OpenAI model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the OpenAI adapter.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL (defaults to [`DEFAULT_BASE_URL`]).
    pub base_url: String,
    /// The model to use.
    pub model: String,
    /// Optional request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl OpenAiConfig {
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
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// Build the JSON request body for the Chat Completions API.
pub fn build_request(model: &str, prompt: &str) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": [ { "role": "user", "content": prompt } ],
        "stream": false,
    })
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

/// Parse a chat completion response body into a [`Completion`].
///
/// # Errors
///
/// Returns [`LlmError::ProviderError`] if the body is malformed or the first
/// choice has no content.
pub fn parse_response(body: &str) -> Result<Completion, LlmError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::ProviderError(format!("OpenAI returned malformed JSON: {e}")))?;

    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| LlmError::ProviderError("OpenAI response contained no content".into()))?;

    let usage = parsed
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens));

    Ok(Completion { text, usage })
}

/// OpenAI provider adapter.
pub struct OpenAiAdapter {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiAdapter")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigError`] if the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = build_client(config.timeout_seconds)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl LanguageModel for OpenAiAdapter {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> Result<Completion, LlmError> {
        tracing::debug!(model = %self.config.model, "sending OpenAI request");

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&build_request(&self.config.model, prompt))
            .send()
            .await
            .map_err(|e| LlmError::from_transport("OpenAI", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::from_transport("OpenAI", e))?;

        if !status.is_success() {
            return Err(LlmError::from_status(
                "OpenAI",
                status,
                &extract_error_message(&body),
            ));
        }

        parse_response(&body)
    }
}
