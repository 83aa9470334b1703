use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use surveyplus_core::Interview;
use surveyplus_service::TurnOutcome;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::{MessageRequest, StartInterviewRequest};

/// Opens an interview on an active study. The body carries the welcome line
/// and the first scripted question.
pub async fn start_interview(
    State(state): State<Arc<AppState>>,
    Path(study_id): Path<String>,
    Json(req): Json<StartInterviewRequest>,
) -> Result<(StatusCode, Json<Interview>), ApiError> {
    let interview =
        state.interview_controller.start_interview(&study_id, req.participant_metadata).await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

/// Returns the interview with `progress` always filled in.
pub async fn get_interview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Interview>, ApiError> {
    let controller = &state.interview_controller;
    let mut interview = controller.get_interview(&id).await?;
    if interview.progress.is_none() {
        interview.progress = Some(controller.session_state(&interview).await?);
    }
    Ok(Json(interview))
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<TurnOutcome>, ApiError> {
    let outcome = state.interview_controller.respond(&id, &req.text).await?;
    tracing::debug!(
        interview_id = %id,
        decision = ?outcome.decision,
        used_fallback = outcome.used_fallback,
        "participant reply handled"
    );
    Ok(Json(outcome))
}

pub async fn abandon_interview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Interview>, ApiError> {
    Ok(Json(state.interview_controller.abandon(&id).await?))
}
