use async_trait::async_trait;
use surveyplus_core::Study;

use crate::error::StorageError;

#[async_trait]
pub trait StudyStore: Send + Sync {
    /// Insert or replace a study.
    async fn save_study(&self, study: &Study) -> Result<(), StorageError>;

    async fn get_study(&self, id: &str) -> Result<Option<Study>, StorageError>;

    /// All studies, newest first.
    async fn list_studies(&self) -> Result<Vec<Study>, StorageError>;

    /// Delete a study together with its interviews and report.
    /// Returns `true` if the study existed.
    async fn delete_study(&self, id: &str) -> Result<bool, StorageError>;
}
