//! Append-only session history of searches and answers.

use std::path::Path;

use chrono::{DateTime, Utc};
use research_search::SearchResult;
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};

/// One invocation of the search client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    /// The query as submitted.
    pub query: String,
    /// When the search returned (UTC).
    pub timestamp: DateTime<Utc>,
    /// Number of results returned.
    pub result_count: usize,
    /// The results themselves. Empty when the search failed.
    pub results: Vec<SearchResult>,
}

/// One completed pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// The query as submitted.
    pub query: String,
    /// When the answer was produced (UTC).
    pub timestamp: DateTime<Utc>,
    /// The synthesized answer.
    pub answer: String,
    /// Links of the cited sources, in citation order.
    pub sources_used: Vec<String>,
    /// Wall-clock seconds spent on the query.
    pub processing_time: f64,
}

/// Session history. Records can be appended and read but never changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryStore {
    queries: Vec<QueryRecord>,
    responses: Vec<ResponseRecord>,
}

impl HistoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a search record stamped with the current time.
    pub fn record_query(&mut self, query: &str, results: &[SearchResult]) {
        self.queries.push(QueryRecord {
            query: query.to_owned(),
            timestamp: Utc::now(),
            result_count: results.len(),
            results: results.to_vec(),
        });
    }

    /// Append an answer record stamped with the current time.
    pub fn record_response(
        &mut self,
        query: &str,
        answer: &str,
        sources_used: Vec<String>,
        processing_time: f64,
    ) {
        self.responses.push(ResponseRecord {
            query: query.to_owned(),
            timestamp: Utc::now(),
            answer: answer.to_owned(),
            sources_used,
            processing_time,
        });
    }

    /// All search records, oldest first.
    pub fn queries(&self) -> &[QueryRecord] {
        &self.queries
    }

    /// All answer records, oldest first.
    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty() && self.responses.is_empty()
    }

    /// Serialize the whole history as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Config`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AgentError::Config(format!("failed to serialize history: {e}")))
    }

    /// Write the history as JSON to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
