//! Core types and the interview engine for surveyplus
//!
//! This crate contains the domain types shared across all other crates and the
//! pure decision logic that drives an interview: signal detection, the
//! follow-up policy, prompt composition, and per-interview session state.

pub mod constants;
pub mod env_config;
mod error;
mod fallback;
mod interview;
mod json_utils;
mod policy;
#[cfg(test)]
mod policy_tests;
mod prompt;
mod report;
mod session_state;
mod signals;
mod stats;
mod study;

pub use error::*;
pub use fallback::fallback_utterance;
pub use interview::*;
pub use json_utils::strip_markdown_json;
pub use policy::*;
pub use prompt::*;
pub use report::*;
pub use session_state::*;
pub use signals::*;
pub use stats::InterviewStats;
pub use study::*;
