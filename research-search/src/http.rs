//! Shared HTTP client construction.
//!
//! Page fetches present themselves as a desktop browser: many sites serve
//! stripped or blocked pages to unknown clients. Search API calls use a
//! plain client identifying this crate.

use std::time::Duration;

use rand::seq::SliceRandom;

use crate::config::FetchConfig;
use crate::error::SearchError;

/// Realistic browser User-Agent strings, one picked per fetch client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// User-Agent sent to the search provider API.
const API_USER_AGENT: &str = concat!("research-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for downloading candidate pages.
///
/// The client has a cookie store (consent redirects), the configured
/// timeout, a browser User-Agent and a bounded redirect policy.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_page_client(config: &FetchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Build a [`reqwest::Client`] for search API requests.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_api_client(timeout_seconds: Option<u64>) -> Result<reqwest::Client, SearchError> {
    let mut builder = reqwest::Client::builder().user_agent(API_USER_AGENT);
    if let Some(secs) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array.
        .unwrap_or(USER_AGENTS[0])
}
