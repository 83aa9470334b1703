//! In-memory store for tests and throwaway runs.

use std::collections::HashMap;

use async_trait::async_trait;
use surveyplus_core::{Interview, Report, Study};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store_traits::{InterviewStore, ReportStore, StudyStore};

#[derive(Debug, Default)]
struct Tables {
    studies: HashMap<String, Study>,
    interviews: HashMap<String, Interview>,
    reports: HashMap<String, Report>,
}

/// Process-local store with the same semantics as the SQLite `Storage`.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    tables: RwLock<Tables>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudyStore for InMemoryStorage {
    async fn save_study(&self, study: &Study) -> Result<(), StorageError> {
        self.tables.write().await.studies.insert(study.id.clone(), study.clone());
        Ok(())
    }

    async fn get_study(&self, id: &str) -> Result<Option<Study>, StorageError> {
        Ok(self.tables.read().await.studies.get(id).cloned())
    }

    async fn list_studies(&self) -> Result<Vec<Study>, StorageError> {
        let mut studies: Vec<Study> = self.tables.read().await.studies.values().cloned().collect();
        studies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(studies)
    }

    async fn delete_study(&self, id: &str) -> Result<bool, StorageError> {
        let mut tables = self.tables.write().await;
        tables.interviews.retain(|_, i| i.study_id != id);
        tables.reports.remove(id);
        Ok(tables.studies.remove(id).is_some())
    }
}

#[async_trait]
impl InterviewStore for InMemoryStorage {
    async fn save_interview(&self, interview: &Interview) -> Result<(), StorageError> {
        self.tables.write().await.interviews.insert(interview.id.clone(), interview.clone());
        Ok(())
    }

    async fn get_interview(&self, id: &str) -> Result<Option<Interview>, StorageError> {
        Ok(self.tables.read().await.interviews.get(id).cloned())
    }

    async fn list_interviews(&self, study_id: &str) -> Result<Vec<Interview>, StorageError> {
        let mut interviews: Vec<Interview> = self
            .tables
            .read()
            .await
            .interviews
            .values()
            .filter(|i| i.study_id == study_id)
            .cloned()
            .collect();
        interviews.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        Ok(interviews)
    }

    async fn delete_interview(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.tables.write().await.interviews.remove(id).is_some())
    }
}

#[async_trait]
impl ReportStore for InMemoryStorage {
    async fn save_report(&self, report: &Report) -> Result<(), StorageError> {
        self.tables.write().await.reports.insert(report.study_id.clone(), report.clone());
        Ok(())
    }

    async fn get_report(&self, study_id: &str) -> Result<Option<Report>, StorageError> {
        Ok(self.tables.read().await.reports.get(study_id).cloned())
    }
}
