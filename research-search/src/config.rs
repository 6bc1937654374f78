//! Search and fetch configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the search provider request; [`FetchConfig`]
//! controls how candidate pages are downloaded and trimmed. Both can be
//! embedded in a TOML file, every field being optional.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Default search provider endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://serpapi.com/search";

/// Default number of results requested from the provider.
pub const DEFAULT_NUM_RESULTS: usize = 5;

/// Default per-page fetch timeout in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Default maximum number of characters kept from a fetched page.
pub const DEFAULT_MAX_CHARS: usize = 5000;

/// Configuration for the search provider.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Provider endpoint URL.
    pub endpoint: String,
    /// Provider API key. Empty means "not configured".
    pub api_key: String,
    /// Backend engine requested from the provider.
    pub engine: String,
    /// Interface language (`hl`).
    pub language: String,
    /// Result country (`gl`).
    pub country: String,
    /// Number of results requested per query.
    pub num_results: usize,
    /// Request timeout in seconds. `None` uses the HTTP client default.
    pub timeout_seconds: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: String::new(),
            engine: "google".to_owned(),
            language: "en".to_owned(),
            country: "us".to_owned(),
            num_results: DEFAULT_NUM_RESULTS,
            timeout_seconds: None,
        }
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("engine", &self.engine)
            .field("language", &self.language)
            .field("country", &self.country)
            .field("num_results", &self.num_results)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl SearchConfig {
    /// Validates this configuration.
    ///
    /// Checks:
    /// - `num_results` must be greater than 0
    /// - `endpoint` must not be empty
    /// - `timeout_seconds`, when set, must be greater than 0
    ///
    /// A missing API key is not a validation error: the provider rejects
    /// the request at search time and the caller degrades to no results.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.num_results == 0 {
            return Err(SearchError::Config(
                "num_results must be greater than 0".into(),
            ));
        }
        if self.endpoint.trim().is_empty() {
            return Err(SearchError::Config("endpoint must not be empty".into()));
        }
        if self.timeout_seconds == Some(0) {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for page fetching and text extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-page HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum characters of extracted text kept per page.
    pub max_chars: usize,
    /// Custom User-Agent string. If `None`, one is picked from a built-in
    /// list of browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECS,
            max_chars: DEFAULT_MAX_CHARS,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_chars == 0 {
            return Err(SearchError::Config("max_chars must be greater than 0".into()));
        }
        Ok(())
    }
}
