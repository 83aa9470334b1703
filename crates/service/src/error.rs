//! Typed error enum for the service layer.

use surveyplus_core::CoreError;
use surveyplus_llm::LlmError;
use surveyplus_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying domain, storage and backend failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Lifecycle or validation rule of a domain type.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Storage operation failed (DB, not found, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Backend call failed where there is no fallback (summaries, reports).
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Caller provided invalid input (empty reply, missing name).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Required backend is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// A reply for this interview is already being processed.
    #[error("interview {0} is busy: a reply is already being processed")]
    Busy(String),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        Self::Storage(StorageError::NotFound { entity, id: id.to_owned() })
    }

    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::Llm(e) => e.is_transient(),
            Self::Busy(_) => true,
            _ => false,
        }
    }

    /// Whether this error represents a not-found condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound { .. }))
    }
}
