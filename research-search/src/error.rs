//! Error types for the research-search crate.
//!
//! Messages are stable strings suitable for logs. API keys never appear
//! in error messages.

/// Errors that can occur while searching, fetching or extracting pages.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A response body could not be parsed or had no usable content.
    #[error("parse error: {0}")]
    Parse(String),

    /// The search provider reported an error in its response body.
    #[error("provider error: {0}")]
    Provider(String),

    /// Invalid search or fetch configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for research-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("no extractable content found".into());
        assert_eq!(err.to_string(), "parse error: no extractable content found");
    }

    #[test]
    fn display_provider() {
        let err = SearchError::Provider("Invalid API key".into());
        assert_eq!(err.to_string(), "provider error: Invalid API key");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("num_results must be > 0".into());
        assert_eq!(err.to_string(), "config error: num_results must be > 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
