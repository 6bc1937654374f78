//! Error types for the research agent.

use research_search::SearchError;

use crate::llm::LlmError;

/// Top-level error type for the research pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Web search failed.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Language model construction or inference error.
    #[error("LLM error: {0}")]
    Llm(String),

    /// The query was rejected before any work was done.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LlmError> for AgentError {
    fn from(err: LlmError) -> Self {
        Self::Llm(err.to_string())
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_error_converts() {
        let err: AgentError = SearchError::Http("timeout".into()).into();
        assert!(matches!(err, AgentError::Search(_)));
        assert_eq!(err.to_string(), "search error: HTTP error: timeout");
    }

    #[test]
    fn llm_error_keeps_code() {
        let err: AgentError = LlmError::AuthError("bad key".into()).into();
        assert!(err.to_string().contains("[AUTH_FAILED]"));
    }

    #[test]
    fn invalid_query_display() {
        let err = AgentError::InvalidQuery("query is empty".into());
        assert_eq!(err.to_string(), "invalid query: query is empty");
    }
}
