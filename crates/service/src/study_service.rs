use std::sync::Arc;

use chrono::Utc;
use surveyplus_core::{CoreError, Interview, InterviewStats, Study, StudyDraft, StudyStatus};
use surveyplus_storage::{InterviewStore, Store, StudyStore};

use crate::error::ServiceError;

/// Study lifecycle: draft, active, complete.
pub struct StudyService {
    store: Arc<dyn Store>,
}

impl StudyService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn validate(draft: &StudyDraft) -> Result<(), ServiceError> {
        if draft.name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("study name is required".to_owned()));
        }
        if draft.research_goal.trim().is_empty() {
            return Err(ServiceError::InvalidInput("research goal is required".to_owned()));
        }
        Ok(())
    }

    pub async fn create(&self, draft: StudyDraft) -> Result<Study, ServiceError> {
        Self::validate(&draft)?;
        let study = Study::new(uuid::Uuid::new_v4().to_string(), draft, Utc::now());
        self.store.save_study(&study).await?;
        tracing::info!(study_id = %study.id, questions = study.question_count(), "study created");
        Ok(study)
    }

    pub async fn get(&self, id: &str) -> Result<Study, ServiceError> {
        self.store.get_study(id).await?.ok_or_else(|| ServiceError::not_found("study", id))
    }

    pub async fn list(&self) -> Result<Vec<Study>, ServiceError> {
        Ok(self.store.list_studies().await?)
    }

    /// Replaces the editable fields. An active study must keep at least one
    /// scripted question.
    pub async fn update(&self, id: &str, draft: StudyDraft) -> Result<Study, ServiceError> {
        Self::validate(&draft)?;
        let mut study = self.get(id).await?;
        study.apply(draft, Utc::now());
        if study.status == StudyStatus::Active && study.question_framework.is_empty() {
            return Err(CoreError::EmptyFramework(study.id).into());
        }
        self.store.save_study(&study).await?;
        Ok(study)
    }

    pub async fn activate(&self, id: &str) -> Result<Study, ServiceError> {
        let mut study = self.get(id).await?;
        study.activate(Utc::now())?;
        self.store.save_study(&study).await?;
        tracing::info!(study_id = %study.id, "study activated");
        Ok(study)
    }

    pub async fn complete(&self, id: &str) -> Result<Study, ServiceError> {
        let mut study = self.get(id).await?;
        study.complete(Utc::now())?;
        self.store.save_study(&study).await?;
        tracing::info!(study_id = %study.id, "study completed");
        Ok(study)
    }

    /// Deletes the study, its interviews and its report.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.store.delete_study(id).await? {
            return Err(ServiceError::not_found("study", id));
        }
        Ok(())
    }

    pub async fn interviews(&self, id: &str) -> Result<Vec<Interview>, ServiceError> {
        self.get(id).await?;
        Ok(self.store.list_interviews(id).await?)
    }

    pub async fn stats(&self, id: &str) -> Result<InterviewStats, ServiceError> {
        Ok(InterviewStats::from_interviews(&self.interviews(id).await?))
    }
}
