//! Configuration types for the research agent.
//!
//! Every section is `#[serde(default)]`, so a TOML file only needs the keys
//! it wants to override:
//!
//! ```toml
//! [search]
//! num_results = 8
//!
//! [llm]
//! provider = "openai"
//! model = "gpt-4o-mini"
//! ```
//!
//! API keys left empty in the file fall back to `SERP_API_KEY`,
//! `GEMINI_API_KEY` and `OPENAI_API_KEY`.

use std::fmt;
use std::path::{Path, PathBuf};

use research_search::{FetchConfig, SearchConfig, DEFAULT_TOP_SOURCES};
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::llm::{gemini, openai};

/// Environment variable holding the search provider key.
pub const SERP_API_KEY_ENV: &str = "SERP_API_KEY";
/// Environment variable holding the Gemini key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable holding the OpenAI key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default number of content characters per source embedded in the prompt.
pub const DEFAULT_CONTEXT_CHARS: usize = 1000;

/// Top-level configuration for the research agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Search provider settings.
    pub search: SearchConfig,
    /// Page fetching settings.
    pub fetch: FetchConfig,
    /// Source selection settings.
    pub ranking: RankingConfig,
    /// Language model settings.
    pub llm: LlmConfig,
}

/// Source selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of top-scored sources handed to the synthesizer.
    pub top_sources: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_sources: DEFAULT_TOP_SOURCES,
        }
    }
}

/// Which language model backend to use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini.
    #[default]
    Gemini,
    /// OpenAI or any OpenAI-compatible chat completions server.
    OpenAi,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => f.write_str("gemini"),
            Self::OpenAi => f.write_str("openai"),
        }
    }
}

/// Language model configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Backend provider.
    pub provider: LlmProvider,
    /// API key. Empty means "use the provider's environment variable".
    pub api_key: String,
    /// Model name. `None` uses the provider default.
    pub model: Option<String>,
    /// Custom API base URL.
    pub base_url: Option<String>,
    /// Maximum characters of each source's content included in the prompt.
    pub context_chars: usize,
    /// Request timeout in seconds. `None` uses the HTTP client default.
    pub timeout_seconds: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            api_key: String::new(),
            model: None,
            base_url: None,
            context_chars: DEFAULT_CONTEXT_CHARS,
            timeout_seconds: None,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("context_chars", &self.context_chars)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl LlmConfig {
    /// The configured model, or the provider's default.
    pub fn model_or_default(&self) -> String {
        match (&self.model, self.provider) {
            (Some(model), _) if !model.trim().is_empty() => model.clone(),
            (_, LlmProvider::Gemini) => gemini::DEFAULT_MODEL.to_owned(),
            (_, LlmProvider::OpenAi) => openai::DEFAULT_MODEL.to_owned(),
        }
    }

    /// Environment variable consulted when `api_key` is empty.
    pub fn api_key_env(&self) -> &'static str {
        match self.provider {
            LlmProvider::Gemini => GEMINI_API_KEY_ENV,
            LlmProvider::OpenAi => OPENAI_API_KEY_ENV,
        }
    }
}

impl AgentConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AgentError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AgentError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/research-agent/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config)
                .join("research-agent")
                .join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("research-agent")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/research-agent-config/config.toml")
        }
    }

    /// Load from `path`, or from the default path when it exists, then fill
    /// empty API keys from the environment and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file cannot be loaded or the result
    /// fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!("no config file found, using defaults");
                    Self::default()
                }
            }
        };
        config.apply_env_fallbacks();
        config.validate()?;
        Ok(config)
    }

    /// Fill empty API keys from the process environment.
    pub fn apply_env_fallbacks(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Fill empty API keys using `lookup` to resolve environment variables.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.search.api_key.trim().is_empty() {
            if let Some(key) = lookup(SERP_API_KEY_ENV) {
                self.search.api_key = key;
            }
        }
        if self.llm.api_key.trim().is_empty() {
            if let Some(key) = lookup(self.llm.api_key_env()) {
                self.llm.api_key = key;
            }
        }
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Config`] on zero counts or timeouts.
    pub fn validate(&self) -> Result<()> {
        self.search
            .validate()
            .map_err(|e| AgentError::Config(e.to_string()))?;
        self.fetch
            .validate()
            .map_err(|e| AgentError::Config(e.to_string()))?;
        if self.ranking.top_sources == 0 {
            return Err(AgentError::Config(
                "ranking.top_sources must be greater than 0".into(),
            ));
        }
        if self.llm.context_chars == 0 {
            return Err(AgentError::Config(
                "llm.context_chars must be greater than 0".into(),
            ));
        }
        if self.llm.timeout_seconds == Some(0) {
            return Err(AgentError::Config(
                "llm.timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
