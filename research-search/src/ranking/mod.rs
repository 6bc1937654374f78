//! Source ranking: quality scoring, domain dedup and top-k selection.
//!
//! The agent applies these in a fixed order: every fetched page is
//! scored, duplicates by domain are dropped keeping the first found, and
//! the survivors are sorted by score and cut to the top few.

pub mod dedup;
pub mod domain;
pub mod quality;
pub mod select;

use crate::types::{EnrichedSource, SearchResult};

/// Score a fetched page and combine it with its search result.
pub fn enrich(result: SearchResult, content: String) -> EnrichedSource {
    let score = quality::score_source(&result.link, Some(&content));
    EnrichedSource::new(result, content, score)
}
