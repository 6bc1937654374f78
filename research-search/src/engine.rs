//! Trait definition for pluggable search providers.
//!
//! A provider turns a query into a list of [`SearchResult`] values. The
//! agent treats any provider error as "no results", so implementations
//! should report failures precisely rather than swallowing them.

use crate::error::SearchError;
use crate::types::SearchResult;

/// A web search backend.
///
/// Implementations handle request construction, authentication and
/// response normalisation for a single provider. Missing fields in the
/// provider's records must be replaced by placeholders, never dropped.
///
/// All implementations must be `Send + Sync` so agents can be moved
/// across tasks.
pub trait SearchProvider: Send + Sync {
    /// Run a search and return up to roughly `limit` normalised results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, the provider reports
    /// an error, or the response cannot be parsed.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Short provider name used in logs (e.g. `"serpapi"`).
    fn name(&self) -> &'static str;
}
