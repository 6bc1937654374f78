//! Source deduplication by domain.
//!
//! Keeps the first source seen for each network location and drops every
//! later one, whatever its score. Run this before any score-based
//! reordering so that "first found" means search-result order.

use std::collections::HashSet;

use crate::types::EnrichedSource;

/// Deduplicate sources by domain, preserving input order.
///
/// The output has at most one entry per distinct domain, and each kept
/// entry is the earliest source with that domain.
pub fn deduplicate_by_domain(sources: Vec<EnrichedSource>) -> Vec<EnrichedSource> {
    let mut seen: HashSet<String> = HashSet::new();
    sources
        .into_iter()
        .filter(|source| seen.insert(source.domain()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchResult;

    fn make_source(url: &str, score: u8) -> EnrichedSource {
        EnrichedSource::new(
            SearchResult::from_parts(Some(format!("Title for {url}")), Some(url.into()), None),
            format!("Content of {url}"),
            score,
        )
    }

    #[test]
    fn distinct_domains_pass_through() {
        let sources = vec![
            make_source("https://a.com/1", 5),
            make_source("https://b.com/1", 6),
        ];
        let deduped = deduplicate_by_domain(sources);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn first_occurrence_wins_regardless_of_score() {
        let sources = vec![
            make_source("https://example.com/low", 2),
            make_source("https://example.com/high", 9),
        ];
        let deduped = deduplicate_by_domain(sources);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].link, "https://example.com/low");
        assert_eq!(deduped[0].quality_score, 2);
    }

    #[test]
    fn order_preserved() {
        let sources = vec![
            make_source("https://c.com", 5),
            make_source("https://a.com", 5),
            make_source("https://c.com/again", 5),
            make_source("https://b.com", 5),
        ];
        let links: Vec<_> = deduplicate_by_domain(sources)
            .into_iter()
            .map(|s| s.link)
            .collect();
        assert_eq!(links, ["https://c.com", "https://a.com", "https://b.com"]);
    }

    #[test]
    fn host_case_is_ignored() {
        let sources = vec![
            make_source("https://Example.COM/a", 5),
            make_source("https://example.com/b", 5),
        ];
        assert_eq!(deduplicate_by_domain(sources).len(), 1);
    }

    #[test]
    fn subdomains_are_separate() {
        let sources = vec![
            make_source("https://en.wikipedia.org/a", 7),
            make_source("https://fr.wikipedia.org/a", 7),
        ];
        assert_eq!(deduplicate_by_domain(sources).len(), 2);
    }

    #[test]
    fn unparseable_links_share_empty_domain() {
        let sources = vec![
            make_source("", 5),
            make_source("not a url", 5),
            make_source("https://a.com", 5),
        ];
        let deduped = deduplicate_by_domain(sources);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].link, "");
    }

    #[test]
    fn output_bounded_by_distinct_domains() {
        let urls = [
            "https://a.com/1",
            "https://b.com/1",
            "https://a.com/2",
            "https://c.com/1",
            "https://b.com/2",
            "https://a.com/3",
        ];
        let sources: Vec<_> = urls.iter().map(|u| make_source(u, 5)).collect();
        let distinct: HashSet<String> = sources.iter().map(EnrichedSource::domain).collect();
        let deduped = deduplicate_by_domain(sources);
        assert!(deduped.len() <= distinct.len());
        assert_eq!(deduped.len(), 3);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(deduplicate_by_domain(vec![]).is_empty());
    }
}
