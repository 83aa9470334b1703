use std::sync::Arc;

use chrono::Utc;
use surveyplus_core::{Interview, InterviewStatus, Report};
use surveyplus_llm::{TextGenerator, generate_report_body, summarize_transcript};
use surveyplus_storage::{InterviewStore, ReportStore, Store, StudyStore};

use crate::error::ServiceError;

/// Single-shot analysis calls: per-interview summaries and study reports.
pub struct ReportService {
    store: Arc<dyn Store>,
    generator: Arc<dyn TextGenerator>,
}

impl ReportService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { store, generator }
    }

    /// Summarises one interview and stores the result as its `ai_summary`.
    pub async fn summarize_interview(&self, interview_id: &str) -> Result<Interview, ServiceError> {
        let mut interview = self
            .store
            .get_interview(interview_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("interview", interview_id))?;
        let study = self
            .store
            .get_study(&interview.study_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("study", &interview.study_id))?;

        let transcript = interview.transcript_text();
        if transcript.is_empty() {
            return Err(ServiceError::InvalidInput("transcript is empty".to_owned()));
        }
        let summary =
            summarize_transcript(self.generator.as_ref(), &transcript, &study.research_goal).await?;
        interview.ai_summary = Some(summary);
        self.store.save_interview(&interview).await?;
        Ok(interview)
    }

    /// Analyses every complete interview of a study and replaces its report.
    pub async fn generate_report(&self, study_id: &str) -> Result<Report, ServiceError> {
        let study = self
            .store
            .get_study(study_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("study", study_id))?;
        let complete: Vec<Interview> = self
            .store
            .list_interviews(study_id)
            .await?
            .into_iter()
            .filter(|i| i.status == InterviewStatus::Complete)
            .collect();
        if complete.is_empty() {
            return Err(ServiceError::InvalidInput(format!(
                "study {study_id} has no complete interviews"
            )));
        }

        let body = generate_report_body(self.generator.as_ref(), &study, &complete).await?;
        let report = Report::assemble(
            uuid::Uuid::new_v4().to_string(),
            study.id.clone(),
            body,
            &complete,
            Utc::now(),
        );
        self.store.save_report(&report).await?;
        tracing::info!(study_id, participants = report.participant_count, "report generated");
        Ok(report)
    }

    pub async fn get_report(&self, study_id: &str) -> Result<Report, ServiceError> {
        self.store.get_report(study_id).await?.ok_or_else(|| ServiceError::not_found("report", study_id))
    }
}
