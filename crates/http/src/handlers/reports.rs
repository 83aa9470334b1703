use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use surveyplus_core::{Interview, Report};

use crate::AppState;
use crate::api_error::ApiError;

pub async fn summarize_interview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Interview>, ApiError> {
    Ok(Json(state.report_service.summarize_interview(&id).await?))
}

pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    Path(study_id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    Ok(Json(state.report_service.generate_report(&study_id).await?))
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(study_id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    Ok(Json(state.report_service.get_report(&study_id).await?))
}
