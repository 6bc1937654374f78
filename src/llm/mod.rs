//! Language model adapters used for answer synthesis.
//!
//! The synthesizer only needs a single non-streaming completion per query,
//! so every backend is reduced to [`LanguageModel::generate`]. Two HTTP
//! backends are provided:
//!
//! - [`GeminiAdapter`] for the Google Generative Language API
//! - [`OpenAiAdapter`] for OpenAI-compatible chat completion endpoints
//!
//! Use [`build_model`] to construct the adapter selected in [`LlmConfig`].

pub mod error;
pub mod gemini;
pub mod openai;
pub mod usage;

use std::time::Duration;

use async_trait::async_trait;

use crate::config::{LlmConfig, LlmProvider};

pub use error::LlmError;
pub use gemini::{GeminiAdapter, GeminiConfig};
pub use openai::{OpenAiAdapter, OpenAiConfig};
pub use usage::TokenUsage;

/// Text produced by a single model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Raw model output.
    pub text: String,
    /// Token counts, when the provider reports them.
    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// Create a completion without usage information.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }

    /// Attach token usage.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// A backend that turns a prompt into text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Short provider identifier (e.g. `"gemini"`).
    fn name(&self) -> &str;

    /// Run one completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<Completion, LlmError>;
}

/// Build the HTTP client shared by the adapters.
pub(crate) fn build_client(timeout_seconds: Option<u64>) -> Result<reqwest::Client, LlmError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| LlmError::ConfigError(format!("failed to build HTTP client: {e}")))
}

/// Construct the adapter selected by `config`.
///
/// # Errors
///
/// Returns [`LlmError::ConfigError`] when the API key is missing or the
/// HTTP client cannot be built.
pub fn build_model(config: &LlmConfig) -> Result<Box<dyn LanguageModel>, LlmError> {
    let api_key = config.api_key.trim();
    if api_key.is_empty() {
        return Err(LlmError::ConfigError(format!(
            "no API key configured for the {} provider",
            config.provider
        )));
    }

    match config.provider {
        LlmProvider::Gemini => {
            let mut cfg = GeminiConfig::new(api_key, config.model_or_default())
                .with_timeout(config.timeout_seconds);
            if let Some(url) = &config.base_url {
                cfg = cfg.with_base_url(url.clone());
            }
            Ok(Box::new(GeminiAdapter::new(cfg)?))
        }
        LlmProvider::OpenAi => {
            let mut cfg = OpenAiConfig::new(api_key, config.model_or_default())
                .with_timeout(config.timeout_seconds);
            if let Some(url) = &config.base_url {
                cfg = cfg.with_base_url(url.clone());
            }
            Ok(Box::new(OpenAiAdapter::new(cfg)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_model_requires_api_key() {
        let config = LlmConfig::default();
        let err = build_model(&config).err().expect("missing key must fail");
        assert_eq!(err.code(), "CONFIG_INVALID");
    }

    #[test]
    fn build_model_selects_provider() {
        let gemini = build_model(&LlmConfig {
            api_key: "g-key".into(),
            ..Default::default()
        })
        .expect("gemini");
        assert_eq!(gemini.name(), "gemini");

        let openai = build_model(&LlmConfig {
            provider: LlmProvider::OpenAi,
            api_key: "sk-key".into(),
            ..Default::default()
        })
        .expect("openai");
        assert_eq!(openai.name(), "openai");
    }

    #[test]
    fn completion_builders() {
        let c = Completion::text("Paris [1]").with_usage(TokenUsage::new(10, 2));
        assert_eq!(c.text, "Paris [1]");
        assert_eq!(c.usage.map(|u| u.total()), Some(12));
    }
}
