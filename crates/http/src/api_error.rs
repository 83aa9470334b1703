//! Typed API error for HTTP handlers.
//!
//! Converts service errors into HTTP responses with a JSON body and status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use surveyplus_core::CoreError;
use surveyplus_service::ServiceError;
use surveyplus_storage::StorageError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` variant logs the real error server-side and returns
/// a static message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input from caller.
    BadRequest(String),
    /// 404 Not Found: requested resource doesn't exist.
    NotFound(String),
    /// 409 Conflict: the request clashes with the current lifecycle state.
    Conflict(String),
    /// 422 Unprocessable Entity: valid syntax but the study cannot be used as-is.
    UnprocessableEntity(String),
    /// 502 Bad Gateway: the text-generation backend failed or answered garbage.
    BadGateway(String),
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
    /// 503 Service Unavailable: required backend not configured.
    ServiceUnavailable(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::UnprocessableEntity(msg)
            | Self::BadGateway(msg)
            | Self::ServiceUnavailable(msg) => msg,
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                "internal server error".to_owned()
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Storage(StorageError::NotFound { entity, id }) => {
                Self::NotFound(format!("{entity} '{id}' not found"))
            },
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::NotConfigured(msg) => Self::ServiceUnavailable(msg),
            ServiceError::Busy(_) => Self::Conflict(err.to_string()),
            ServiceError::Core(CoreError::EmptyFramework(_)) => {
                Self::UnprocessableEntity(err.to_string())
            },
            ServiceError::Core(CoreError::InvalidInput(msg)) => Self::BadRequest(msg),
            ServiceError::Core(_) => Self::Conflict(err.to_string()),
            ServiceError::Llm(ref e) => {
                tracing::warn!(error = %e, "text generation backend failed");
                Self::BadGateway("text generation backend failed".to_owned())
            },
            ServiceError::Storage(_) => Self::Internal(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_interview_is_a_conflict() {
        let err: ApiError = ServiceError::Busy("i-1".to_owned()).into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn missing_study_is_not_found() {
        let err: ApiError = ServiceError::Storage(StorageError::NotFound {
            entity: "study",
            id: "s-9".to_owned(),
        })
        .into();
        assert!(matches!(&err, ApiError::NotFound(msg) if msg == "study 's-9' not found"));
    }

    #[test]
    fn empty_framework_is_unprocessable() {
        let err: ApiError = ServiceError::Core(CoreError::EmptyFramework("s-1".to_owned())).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn lifecycle_violation_is_a_conflict() {
        let err: ApiError = ServiceError::Core(CoreError::StudyNotActive("s-1".to_owned())).into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn backend_failure_hides_details() {
        let err: ApiError = ServiceError::Llm(surveyplus_llm::LlmError::EmptyResponse).into();
        assert!(matches!(&err, ApiError::BadGateway(msg) if !msg.contains("empty")));
    }

    #[test]
    fn database_failure_is_internal() {
        let err: ApiError =
            ServiceError::Storage(StorageError::Migration("boom".to_owned())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
