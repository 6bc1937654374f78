//! # research-search
//!
//! Retrieval and ranking for the research agent.
//!
//! This crate turns a query into candidate sources and decides which of
//! them deserve a language model's attention. It knows nothing about
//! language models.
//!
//! ## Design
//!
//! - [`engine::SearchProvider`] abstracts the search API; [`SerpApiProvider`]
//!   queries SerpAPI's Google engine and normalises missing fields
//! - [`fetch::PageFetcher`] downloads pages with a browser User-Agent and a
//!   fixed timeout; [`content`] projects HTML to bounded plain text
//! - [`ranking`] scores sources heuristically, drops duplicate domains and
//!   keeps the top few by score
//!
//! ## Security
//!
//! - API keys are redacted from `Debug` output and stripped from error URLs
//! - Search queries are logged only at debug level

pub mod config;
pub mod content;
pub mod engine;
pub mod engines;
pub mod error;
pub mod fetch;
pub mod http;
pub mod ranking;
pub mod types;

pub use config::{FetchConfig, SearchConfig};
pub use engine::SearchProvider;
pub use engines::SerpApiProvider;
pub use error::{Result, SearchError};
pub use fetch::{HttpPageFetcher, PageFetcher};
pub use ranking::dedup::deduplicate_by_domain;
pub use ranking::quality::{score_breakdown, score_source, ScoreBreakdown};
pub use ranking::select::{select, select_top, DEFAULT_TOP_SOURCES};
pub use types::{EnrichedSource, PageContent, SearchResult};

/// Search the web with SerpAPI using `config`.
///
/// Convenience wrapper that builds a [`SerpApiProvider`] and requests
/// `config.num_results` results.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration and any
/// error reported by [`SerpApiProvider`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> research_search::Result<()> {
/// let config = research_search::SearchConfig {
///     api_key: "serp-key".into(),
///     ..Default::default()
/// };
/// let results = research_search::search("rust programming", &config).await?;
/// for result in &results {
///     println!("{}: {}", result.title, result.link);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<Vec<SearchResult>> {
    let provider = SerpApiProvider::new(config.clone())?;
    provider.search(query, config.num_results).await
}

/// Fetch a page and extract its bounded plain text.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the page cannot be fetched, or
/// [`SearchError::Parse`] if it has no visible text.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> research_search::Result<()> {
/// let page = research_search::fetch_page_content("https://example.com").await?;
/// println!("{}: {} chars", page.title, page.char_count);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_page_content(url: &str) -> Result<PageContent> {
    HttpPageFetcher::new(&FetchConfig::default())?
        .fetch_page(url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_validates_config_zero_results() {
        let config = SearchConfig {
            api_key: "key".into(),
            num_results: 0,
            ..Default::default()
        };
        let err = search("test", &config).await.unwrap_err();
        assert!(err.to_string().contains("num_results"));
    }

    #[tokio::test]
    async fn search_without_api_key_fails() {
        let err = search("test", &SearchConfig::default()).await.unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[tokio::test]
    async fn fetch_page_content_rejects_bad_url() {
        let err = fetch_page_content("::not a url::").await.unwrap_err();
        assert!(matches!(err, SearchError::Http(_)));
    }
}
