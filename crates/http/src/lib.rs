//! HTTP API server for surveyplus.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_copy_implementations, reason = "Types may grow")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod api_types;
mod handlers;
#[cfg(test)]
mod router_tests;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use surveyplus_service::{InterviewController, ReportService, StudyService};

pub use api_types::{MessageRequest, StartInterviewRequest};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Study lifecycle, listing and statistics
    pub study_service: Arc<StudyService>,
    /// Runs the interview loop
    pub interview_controller: Arc<InterviewController>,
    /// Interview summaries and study reports
    pub report_service: Arc<ReportService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/studies",
            get(handlers::studies::list_studies).post(handlers::studies::create_study),
        )
        .route(
            "/api/studies/{id}",
            get(handlers::studies::get_study)
                .put(handlers::studies::update_study)
                .delete(handlers::studies::delete_study),
        )
        .route("/api/studies/{id}/activate", post(handlers::studies::activate_study))
        .route("/api/studies/{id}/complete", post(handlers::studies::complete_study))
        .route("/api/studies/{id}/stats", get(handlers::studies::study_stats))
        .route(
            "/api/studies/{id}/interviews",
            get(handlers::studies::list_interviews).post(handlers::interviews::start_interview),
        )
        .route(
            "/api/studies/{id}/report",
            get(handlers::reports::get_report).post(handlers::reports::generate_report),
        )
        .route("/api/interviews/{id}", get(handlers::interviews::get_interview))
        .route("/api/interviews/{id}/messages", post(handlers::interviews::send_message))
        .route("/api/interviews/{id}/abandon", post(handlers::interviews::abandon_interview))
        .route("/api/interviews/{id}/summary", post(handlers::reports::summarize_interview))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
