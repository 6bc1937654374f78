//! The research pipeline: search, fetch, score, dedup, rank, synthesize.
//!
//! [`ResearchAgent::process_query`] never fails. Degraded steps shrink the
//! candidate set, and an unexpected [`AgentError`] becomes an apologetic
//! answer with timing-only metrics.

use std::time::Instant;

use research_search::ranking::enrich;
use research_search::{
    deduplicate_by_domain, select_top, EnrichedSource, HttpPageFetcher, PageFetcher,
    SearchProvider, SearchResult, SerpApiProvider,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{AgentConfig, DEFAULT_CONTEXT_CHARS};
use crate::error::{AgentError, Result};
use crate::history::HistoryStore;
use crate::llm::{build_model, LanguageModel, TokenUsage};
use crate::synthesis::Synthesizer;

/// Answer returned when the search produced nothing to work with.
pub const NO_SOURCES_ANSWER: &str =
    "I couldn't find any relevant sources for your query. Please try a different search term.";

/// Timing and counting information for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Wall-clock seconds from the start of the query.
    pub processing_time: f64,
    /// Sources whose content was fetched, before deduplication.
    pub sources_evaluated: usize,
    /// Sources cited by the answer.
    pub sources_used: usize,
    /// Token usage reported by the language model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
}

impl Metrics {
    fn elapsed_only(start: Instant) -> Self {
        Self {
            processing_time: start.elapsed().as_secs_f64(),
            ..Default::default()
        }
    }
}

/// Caller-facing result of [`ResearchAgent::process_query`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// The answer text.
    pub answer: String,
    /// Sources the answer cites.
    pub citations: Vec<EnrichedSource>,
    /// Timing and counts.
    pub metrics: Metrics,
}

/// Default number of results requested per query.
pub const DEFAULT_NUM_RESULTS: usize = research_search::config::DEFAULT_NUM_RESULTS;

/// A research agent over a search provider, a page fetcher and a model.
///
/// The agent owns its [`HistoryStore`]. `process_query` takes `&mut self`,
/// so one agent handles one query at a time.
pub struct ResearchAgent<S, F> {
    provider: S,
    fetcher: F,
    model: Box<dyn LanguageModel>,
    history: HistoryStore,
    num_results: usize,
    top_sources: usize,
    context_chars: usize,
}

impl ResearchAgent<SerpApiProvider, HttpPageFetcher> {
    /// Build an agent backed by SerpAPI, HTTP page fetching and the
    /// configured language model.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or any backend
    /// cannot be constructed (for example a missing model API key).
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        let provider = SerpApiProvider::new(config.search.clone())?;
        let fetcher = HttpPageFetcher::new(&config.fetch)?;
        let model = build_model(&config.llm)?;
        info!(
            search = provider.name(),
            llm = model.name(),
            "research agent initialised"
        );
        Ok(Self::new(provider, fetcher, model)
            .with_num_results(config.search.num_results)
            .with_top_sources(config.ranking.top_sources)
            .with_context_chars(config.llm.context_chars))
    }
}

impl<S, F> ResearchAgent<S, F>
where
    S: SearchProvider,
    F: PageFetcher,
{
    /// Create an agent with default limits and an empty history.
    pub fn new(provider: S, fetcher: F, model: Box<dyn LanguageModel>) -> Self {
        Self {
            provider,
            fetcher,
            model,
            history: HistoryStore::new(),
            num_results: DEFAULT_NUM_RESULTS,
            top_sources: research_search::DEFAULT_TOP_SOURCES,
            context_chars: DEFAULT_CONTEXT_CHARS,
        }
    }

    /// Set the number of results requested from the provider.
    pub fn with_num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results;
        self
    }

    /// Set how many top-scored sources reach the synthesizer.
    pub fn with_top_sources(mut self, top_sources: usize) -> Self {
        self.top_sources = top_sources;
        self
    }

    /// Set the per-source content size embedded in the prompt.
    pub fn with_context_chars(mut self, context_chars: usize) -> Self {
        self.context_chars = context_chars;
        self
    }

    /// Continue an existing history instead of starting empty.
    pub fn with_history(mut self, history: HistoryStore) -> Self {
        self.history = history;
        self
    }

    /// Read access to the session history.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Consume the agent and hand back its history.
    pub fn into_history(self) -> HistoryStore {
        self.history
    }

    /// Search the web for `query`, logging the call in the history.
    ///
    /// Provider failures are logged and yield an empty list.
    pub async fn search_web(&mut self, query: &str) -> Vec<SearchResult> {
        debug!(provider = self.provider.name(), query, "searching");
        let results = match self.provider.search(query, self.num_results).await {
            Ok(results) => results,
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "search failed");
                Vec::new()
            }
        };
        self.history.record_query(query, &results);
        results
    }

    /// Answer `query` with cited web sources.
    ///
    /// Always returns an outcome. Only complete runs are added to the
    /// response history.
    pub async fn process_query(&mut self, query: &str) -> QueryOutcome {
        let start = Instant::now();
        match self.run(query, start).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "query processing failed");
                QueryOutcome {
                    answer: format!("An error occurred while processing your query: {e}"),
                    citations: Vec::new(),
                    metrics: Metrics::elapsed_only(start),
                }
            }
        }
    }

    async fn run(&mut self, query: &str, start: Instant) -> Result<QueryOutcome> {
        if query.trim().is_empty() {
            return Err(AgentError::InvalidQuery("query is empty".into()));
        }

        let results = self.search_web(query).await;
        if results.is_empty() {
            return Ok(QueryOutcome {
                answer: NO_SOURCES_ANSWER.to_owned(),
                citations: Vec::new(),
                metrics: Metrics::elapsed_only(start),
            });
        }

        let enriched = self.fetch_and_score(results).await;
        let sources_evaluated = enriched.len();

        let unique = deduplicate_by_domain(enriched);
        let selected = select_top(unique, self.top_sources);
        debug!(
            evaluated = sources_evaluated,
            selected = selected.len(),
            "sources ranked"
        );

        let synthesis = Synthesizer::new(self.model.as_ref())
            .with_context_chars(self.context_chars)
            .synthesize(query, &selected)
            .await;

        let metrics = Metrics {
            processing_time: start.elapsed().as_secs_f64(),
            sources_evaluated,
            sources_used: synthesis.citations.len(),
            token_usage: synthesis.usage,
        };

        self.history.record_response(
            query,
            &synthesis.answer,
            synthesis.citations.iter().map(|s| s.link.clone()).collect(),
            metrics.processing_time,
        );

        Ok(QueryOutcome {
            answer: synthesis.answer,
            citations: synthesis.citations,
            metrics,
        })
    }

    /// Fetch each result in order and score the ones that yield content.
    async fn fetch_and_score(&self, results: Vec<SearchResult>) -> Vec<EnrichedSource> {
        let mut enriched = Vec::with_capacity(results.len());
        for result in results {
            if result.link.is_empty() {
                debug!(title = %result.title, "skipping result without a link");
                continue;
            }
            match self.fetcher.fetch(&result.link).await {
                Some(content) => {
                    let source = enrich(result, content);
                    debug!(link = %source.link, score = source.quality_score, "source scored");
                    enriched.push(source);
                }
                None => debug!(link = %result.link, "no content fetched"),
            }
        }
        enriched
    }
}
