use std::time::Duration;

use surveyplus_core::env_config::env_parse_with_default;

use crate::ai_types::{ANTHROPIC_VERSION, MessagesRequest, MessagesResponse};
use crate::error::LlmError;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Retry schedule for an overloaded backend: `base_delay * 2^(attempt - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 3, base_delay: Duration::from_secs(1) }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

/// Client for the Anthropic Messages API.
pub struct LlmClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) model: String,
    pub(crate) retry: RetryPolicy,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("retry", &self.retry)
            .finish()
    }
}

impl LlmClient {
    /// Creates a client for `base_url` with the default model.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url, model: DEFAULT_MODEL.to_owned(), retry: RetryPolicy::default() })
    }

    /// Builds a client from `SURVEYPLUS_API_KEY` (or `ANTHROPIC_API_KEY`),
    /// `SURVEYPLUS_API_URL` and `SURVEYPLUS_MODEL`.
    ///
    /// # Errors
    /// `ClientInit` when no API key is set or the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = ["SURVEYPLUS_API_KEY", "ANTHROPIC_API_KEY"]
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| {
                LlmError::ClientInit("SURVEYPLUS_API_KEY (or ANTHROPIC_API_KEY) is not set".to_owned())
            })?;
        let base_url = std::env::var("SURVEYPLUS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let mut client = Self::new(api_key, base_url)?;
        if let Ok(model) = std::env::var("SURVEYPLUS_MODEL") {
            client.model = model;
        }
        client.retry.max_retries =
            env_parse_with_default("SURVEYPLUS_API_MAX_RETRIES", client.retry.max_retries);
        Ok(client)
    }

    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a Messages request and return the concatenated text blocks.
    ///
    /// Retries only while the backend answers 529 (overloaded). The result
    /// may be empty; callers decide what an empty reply means.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the API returns a
    /// non-success status, the body cannot be parsed, or every retry was
    /// answered with 529.
    pub(crate) async fn messages(&self, request: &MessagesRequest<'_>) -> Result<String, LlmError> {
        let max_retries = self.retry.max_retries;
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..=max_retries {
            if attempt > 0 {
                let delay = self.retry.delay_for(attempt);
                tracing::warn!(attempt, max_retries, ?delay, "backend overloaded, retrying");
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(format!("{}/v1/messages", self.base_url))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(request)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                let body = response.text().await?;
                let parsed: MessagesResponse =
                    serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                        context: format!("messages response (body: {})", truncate(&body, 200)),
                        source: e,
                    })?;
                return Ok(parsed.text());
            }

            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            let err = LlmError::HttpStatus { code: status.as_u16(), body };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        Err(LlmError::RetriesExhausted(Box::new(last_error.unwrap_or(LlmError::EmptyResponse))))
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
