//! Text-generation backend for surveyplus
//!
//! An Anthropic Messages API client with overload retry, the
//! [`TextGenerator`] port the interview controller talks to, and the
//! single-shot summary and report calls.

mod ai_types;
mod client;
mod error;
mod generator;
mod report;
mod summary;

pub use client::{DEFAULT_API_URL, DEFAULT_MODEL, LlmClient, RetryPolicy, truncate};
pub use error::LlmError;
pub use generator::{
    CompletionRequest, INTERVIEW_MAX_TOKENS, TextGenerator, Turn, interviewer_turn,
};
pub use report::{REPORT_MAX_TOKENS, generate_report_body, parse_report};
pub use summary::{SUMMARY_MAX_TOKENS, summarize_transcript};
