use anyhow::Result;
use std::sync::Arc;
use surveyplus_core::PolicyConfig;
use surveyplus_http::{AppState, create_router};
use surveyplus_llm::LlmClient;
use surveyplus_service::{InterviewController, ReportService, StudyService};

use crate::open_storage;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let llm = Arc::new(LlmClient::from_env()?);
    let storage = open_storage()?;
    let policy = PolicyConfig::from_env();
    tracing::info!(model = llm.model(), ?policy, "interview engine configured");

    let state = Arc::new(AppState {
        study_service: Arc::new(StudyService::new(storage.clone())),
        interview_controller: Arc::new(InterviewController::new(
            storage.clone(),
            llm.clone(),
            policy,
        )),
        report_service: Arc::new(ReportService::new(storage, llm)),
    });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
