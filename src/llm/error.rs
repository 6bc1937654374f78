//! Error types for language model adapters.
//!
//! Each variant carries a stable error code (SCREAMING_SNAKE_CASE) that is
//! included in the Display output and accessible via [`LlmError::code()`].

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// Invalid or missing configuration.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    /// Authentication failed (invalid/missing API key).
    pub const AUTH_FAILED: &str = "AUTH_FAILED";

    /// Request to the provider failed or was rate limited.
    pub const REQUEST_FAILED: &str = "REQUEST_FAILED";

    /// Request timed out.
    pub const TIMEOUT_ERROR: &str = "TIMEOUT_ERROR";

    /// Provider returned an error status or an unusable body.
    pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";
}

/// Errors produced by language model adapters.
///
/// The Display impl formats as `[CODE] message`. API keys never appear in
/// messages.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Invalid or missing configuration.
    #[error("[{}] {}", error_codes::CONFIG_INVALID, .0)]
    ConfigError(String),

    /// Authentication failed (invalid/missing API key).
    #[error("[{}] {}", error_codes::AUTH_FAILED, .0)]
    AuthError(String),

    /// Request to the provider failed or was rate limited.
    #[error("[{}] {}", error_codes::REQUEST_FAILED, .0)]
    RequestError(String),

    /// Request timed out.
    #[error("[{}] {}", error_codes::TIMEOUT_ERROR, .0)]
    TimeoutError(String),

    /// Provider returned an error status or an unusable body.
    #[error("[{}] {}", error_codes::PROVIDER_ERROR, .0)]
    ProviderError(String),
}

impl LlmError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => error_codes::CONFIG_INVALID,
            Self::AuthError(_) => error_codes::AUTH_FAILED,
            Self::RequestError(_) => error_codes::REQUEST_FAILED,
            Self::TimeoutError(_) => error_codes::TIMEOUT_ERROR,
            Self::ProviderError(_) => error_codes::PROVIDER_ERROR,
        }
    }

    /// Returns the inner message without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::ConfigError(m)
            | Self::AuthError(m)
            | Self::RequestError(m)
            | Self::TimeoutError(m)
            | Self::ProviderError(m) => m,
        }
    }

    /// Map a transport error from `reqwest`, keeping timeouts distinct.
    pub(crate) fn from_transport(provider: &str, err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            Self::TimeoutError(format!("{provider} request timed out: {err}"))
        } else {
            Self::RequestError(format!("{provider} request failed: {err}"))
        }
    }

    /// Map a non-success HTTP status to the matching variant.
    pub(crate) fn from_status(provider: &str, status: reqwest::StatusCode, message: &str) -> Self {
        match status.as_u16() {
            401 | 403 => Self::AuthError(format!("{provider} authentication failed: {message}")),
            429 => Self::RequestError(format!("{provider} rate limited: {message}")),
            code => Self::ProviderError(format!("{provider} HTTP {code}: {message}")),
        }
    }
}

/// Extract an error message from a provider error body.
///
/// Both Gemini and OpenAI wrap errors as `{"error": {"message": ...}}`.
pub(crate) fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.chars().take(512).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(LlmError::ConfigError("x".into()).code(), "CONFIG_INVALID");
        assert_eq!(LlmError::AuthError("x".into()).code(), "AUTH_FAILED");
        assert_eq!(LlmError::RequestError("x".into()).code(), "REQUEST_FAILED");
        assert_eq!(LlmError::TimeoutError("x".into()).code(), "TIMEOUT_ERROR");
        assert_eq!(LlmError::ProviderError("x".into()).code(), "PROVIDER_ERROR");
    }

    #[test]
    fn display_includes_code_prefix() {
        let err = LlmError::ConfigError("missing api key".into());
        let display = err.to_string();
        assert!(display.starts_with("[CONFIG_INVALID]"));
        assert!(display.contains("missing api key"));
    }

    #[test]
    fn message_returns_inner_text() {
        let err = LlmError::ProviderError("bad gateway".into());
        assert_eq!(err.message(), "bad gateway");
    }

    #[test]
    fn status_mapping() {
        use reqwest::StatusCode;
        assert!(matches!(
            LlmError::from_status("gemini", StatusCode::UNAUTHORIZED, "bad key"),
            LlmError::AuthError(_)
        ));
        assert!(matches!(
            LlmError::from_status("gemini", StatusCode::FORBIDDEN, "denied"),
            LlmError::AuthError(_)
        ));
        assert!(matches!(
            LlmError::from_status("openai", StatusCode::TOO_MANY_REQUESTS, "slow down"),
            LlmError::RequestError(_)
        ));
        let err = LlmError::from_status("openai", StatusCode::BAD_GATEWAY, "upstream");
        assert!(matches!(err, LlmError::ProviderError(_)));
        assert!(err.message().contains("502"));
    }

    #[test]
    fn error_message_extraction() {
        let body = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
        assert_eq!(extract_error_message(body), "API key not valid");
        assert_eq!(extract_error_message("Service Unavailable"), "Service Unavailable");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LlmError>();
    }
}
