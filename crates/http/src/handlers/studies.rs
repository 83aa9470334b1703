use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use surveyplus_core::{Interview, InterviewStats, Study, StudyDraft};

use crate::AppState;
use crate::api_error::ApiError;

pub async fn list_studies(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Study>>, ApiError> {
    Ok(Json(state.study_service.list().await?))
}

pub async fn create_study(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<StudyDraft>,
) -> Result<(StatusCode, Json<Study>), ApiError> {
    let study = state.study_service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(study)))
}

pub async fn get_study(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Study>, ApiError> {
    Ok(Json(state.study_service.get(&id).await?))
}

pub async fn update_study(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(draft): Json<StudyDraft>,
) -> Result<Json<Study>, ApiError> {
    Ok(Json(state.study_service.update(&id, draft).await?))
}

pub async fn delete_study(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.study_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn activate_study(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Study>, ApiError> {
    Ok(Json(state.study_service.activate(&id).await?))
}

pub async fn complete_study(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Study>, ApiError> {
    Ok(Json(state.study_service.complete(&id).await?))
}

pub async fn list_interviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Interview>>, ApiError> {
    Ok(Json(state.study_service.interviews(&id).await?))
}

pub async fn study_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<InterviewStats>, ApiError> {
    Ok(Json(state.study_service.stats(&id).await?))
}
