//! Top-k selection by quality score.

use crate::types::EnrichedSource;

/// Number of sources handed to the synthesizer.
pub const DEFAULT_TOP_SOURCES: usize = 3;

/// Sort by `quality_score` descending and keep the first `k`.
///
/// The sort is stable: sources with equal scores keep their input order.
pub fn select_top(mut sources: Vec<EnrichedSource>, k: usize) -> Vec<EnrichedSource> {
    sources.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));
    sources.truncate(k);
    sources
}

/// [`select_top`] with [`DEFAULT_TOP_SOURCES`].
pub fn select(sources: Vec<EnrichedSource>) -> Vec<EnrichedSource> {
    select_top(sources, DEFAULT_TOP_SOURCES)
}
