//! Page fetching: download a candidate URL and project it to plain text.
//!
//! [`PageFetcher`] is the boundary the agent depends on. It yields
//! `Option<String>`: any failure is logged here and becomes `None`, so a
//! dead link never interrupts the pipeline.

use std::future::Future;

use crate::config::FetchConfig;
use crate::content::extract_page;
use crate::error::{Result, SearchError};
use crate::http::build_page_client;
use crate::types::PageContent;

/// Retrieves the plain-text content of a page.
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its bounded plain text, or `None` on any
    /// transport, status or extraction failure.
    fn fetch(&self, url: &str) -> impl Future<Output = Option<String>> + Send;
}

/// [`PageFetcher`] backed by a browser-like HTTP client.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
    max_chars: usize,
}

impl HttpPageFetcher {
    /// Create a fetcher from a fetch configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an invalid configuration or
    /// [`SearchError::Http`] if the client cannot be built.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client: build_page_client(config)?,
            max_chars: config.max_chars,
        })
    }

    /// Fetch and extract a page, reporting the precise failure.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] on transport failure or a non-2xx
    /// status, and [`SearchError::Parse`] if the page has no visible text.
    pub async fn fetch_page(&self, url: &str) -> Result<PageContent> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http(format!("HTTP {}", status.as_u16())));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("failed to read body: {e}")))?;

        extract_page(&html, url, self.max_chars)
    }
}

impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.fetch_page(url).await {
            Ok(page) => {
                tracing::debug!(url, chars = page.char_count, "fetched page");
                Some(page.text)
            }
            Err(err) => {
                tracing::warn!(url, error = %err, "error fetching page");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpPageFetcher>();
    }

    #[test]
    fn invalid_config_rejected() {
        let config = FetchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(HttpPageFetcher::new(&config).is_err());
    }

    #[tokio::test]
    async fn unparseable_url_yields_none() {
        let fetcher = HttpPageFetcher::new(&FetchConfig::default()).expect("fetcher");
        assert!(fetcher.fetch("not a url").await.is_none());
    }
}
