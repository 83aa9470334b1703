//! Typed error enum for the LLM crate.

use thiserror::Error;

/// Backend status code for "overloaded".
pub(crate) const OVERLOADED: u16 = 529;

/// Errors from text-generation API operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response: no text content returned")]
    EmptyResponse,
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("all retries exhausted, last error: {0}")]
    RetriesExhausted(Box<LlmError>),
}

impl LlmError {
    /// Whether this error is transient and should be retried.
    ///
    /// Only an overloaded backend is retried; everything else goes straight
    /// to the caller's fallback path.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::HttpStatus { code: OVERLOADED, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_overload_is_transient() {
        assert!(LlmError::HttpStatus { code: 529, body: String::new() }.is_transient());
        for code in [400, 401, 429, 500, 503] {
            assert!(!LlmError::HttpStatus { code, body: String::new() }.is_transient(), "{code}");
        }
        assert!(!LlmError::EmptyResponse.is_transient());
    }
}
