//! Core record types: raw search hits, fetched pages and scored sources.

use serde::{Deserialize, Serialize};

use crate::ranking::domain::domain_of;

/// Placeholder used when a search hit has no title.
pub const NO_TITLE: &str = "No title";

/// Placeholder used when a search hit has no snippet.
pub const NO_SNIPPET: &str = "No snippet available";

/// A single organic result returned by the search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result page, or [`NO_TITLE`].
    pub title: String,
    /// The URL of the result page. May be empty if the provider omitted it.
    pub link: String,
    /// A text snippet summarising the page, or [`NO_SNIPPET`].
    pub snippet: String,
}

impl SearchResult {
    /// Build a result, substituting placeholders for missing fields.
    pub fn from_parts(
        title: Option<String>,
        link: Option<String>,
        snippet: Option<String>,
    ) -> Self {
        Self {
            title: title.unwrap_or_else(|| NO_TITLE.to_owned()),
            link: link.unwrap_or_default(),
            snippet: snippet.unwrap_or_else(|| NO_SNIPPET.to_owned()),
        }
    }
}

/// A search result whose page was fetched and scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedSource {
    /// Title copied from the search result.
    pub title: String,
    /// URL of the source page.
    pub link: String,
    /// Snippet copied from the search result.
    pub snippet: String,
    /// Extracted plain text of the page, bounded in length.
    pub content: String,
    /// Heuristic trust score in `1..=10`.
    pub quality_score: u8,
}

impl EnrichedSource {
    /// Combine a search result with its fetched content and score.
    pub fn new(result: SearchResult, content: String, quality_score: u8) -> Self {
        Self {
            title: result.title,
            link: result.link,
            snippet: result.snippet,
            content,
            quality_score,
        }
    }

    /// The network location of [`Self::link`], used as the dedup key.
    pub fn domain(&self) -> String {
        domain_of(&self.link)
    }
}

/// Extracted readable content from a fetched web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// The URL that was fetched.
    pub url: String,
    /// The page title, empty when the page has none.
    pub title: String,
    /// Whitespace-collapsed text with scripts and styles removed.
    pub text: String,
    /// Number of characters in `text`.
    pub char_count: usize,
}
