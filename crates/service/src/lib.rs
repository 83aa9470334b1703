//! Service layer for surveyplus
//!
//! The interview controller plus the study and report services that sit
//! between the HTTP/CLI front ends and storage/llm.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Services hold trait objects")]

mod error;
mod interview_controller;
mod observer;
mod report_service;
mod study_service;
#[cfg(test)]
mod test_support;

pub use error::ServiceError;
pub use interview_controller::{InterviewController, TurnOutcome};
pub use observer::{NoopObserver, TracingObserver, TransitionEvent, TransitionObserver};
pub use report_service::ReportService;
pub use study_service::StudyService;
