use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by domain validation and lifecycle rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("study {0} has an empty question framework")]
    EmptyFramework(String),

    #[error("invalid {entity} transition for {id}: {from} -> {to}")]
    InvalidTransition { entity: &'static str, id: String, from: &'static str, to: &'static str },

    #[error("study {0} is not accepting interviews")]
    StudyNotActive(String),

    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, CoreError>;
