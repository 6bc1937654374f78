//! SerpAPI search provider: Google results as JSON.
//!
//! Sends `q`, `api_key`, `engine`, `num`, `hl` and `gl` as query
//! parameters and reads the `organic_results` list from the response.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::engine::SearchProvider;
use crate::error::SearchError;
use crate::http::build_api_client;
use crate::types::SearchResult;

/// Raw response body. Only the fields the agent consumes are modelled.
#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Option<Vec<OrganicResult>>,
    #[serde(default)]
    error: Option<String>,
}

/// One entry of `organic_results`. Every field may be missing or null.
#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

/// SerpAPI-backed [`SearchProvider`].
pub struct SerpApiProvider {
    config: SearchConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for SerpApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiProvider")
            .field("config", &self.config)
            .finish()
    }
}

impl SerpApiProvider {
    /// Create a provider from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = build_api_client(config.timeout_seconds)?;
        Ok(Self { config, client })
    }

    /// Query parameters for a search request.
    fn query_params(&self, query: &str, limit: usize) -> Vec<(&'static str, String)> {
        vec![
            ("q", query.to_owned()),
            ("api_key", self.config.api_key.clone()),
            ("engine", self.config.engine.clone()),
            ("num", limit.to_string()),
            ("hl", self.config.language.clone()),
            ("gl", self.config.country.clone()),
        ]
    }
}

/// Parse a SerpAPI JSON body into normalised results.
///
/// A body without `organic_results` yields an empty list. A body that
/// carries only an `error` field is reported as [`SearchError::Provider`].
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the body is not valid JSON of the
/// expected shape.
pub fn parse_response(body: &str) -> Result<Vec<SearchResult>, SearchError> {
    let response: SerpApiResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("invalid search response: {e}")))?;

    match (response.organic_results, response.error) {
        (Some(items), _) => Ok(items
            .into_iter()
            .map(|item| SearchResult::from_parts(item.title, item.link, item.snippet))
            .collect()),
        (None, Some(message)) => Err(SearchError::Provider(message)),
        (None, None) => Ok(Vec::new()),
    }
}

/// Extract a human-readable message from an error response body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| body.chars().take(256).collect())
}

impl SearchProvider for SerpApiProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        if limit == 0 {
            return Err(SearchError::Config("limit must be greater than 0".into()));
        }
        if self.config.api_key.trim().is_empty() {
            return Err(SearchError::Config("search API key is not set".into()));
        }

        tracing::debug!(query, limit, "sending search request");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&self.query_params(query, limit))
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("search request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("failed to read search response: {e}")))?;

        if !status.is_success() {
            return Err(SearchError::Http(format!(
                "search provider returned HTTP {}: {}",
                status.as_u16(),
                extract_error_message(&body)
            )));
        }

        let results = parse_response(&body)?;
        tracing::debug!(count = results.len(), "search provider returned results");
        Ok(results)
    }

    fn name(&self) -> &'static str {
        "serpapi"
    }
}
