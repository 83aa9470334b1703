use async_trait::async_trait;
use surveyplus_core::Interview;

use crate::error::StorageError;

#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Insert or replace the whole interview record, transcript included.
    async fn save_interview(&self, interview: &Interview) -> Result<(), StorageError>;

    async fn get_interview(&self, id: &str) -> Result<Option<Interview>, StorageError>;

    /// Interviews of one study, oldest first.
    async fn list_interviews(&self, study_id: &str) -> Result<Vec<Interview>, StorageError>;

    /// Returns `true` if a row was deleted.
    async fn delete_interview(&self, id: &str) -> Result<bool, StorageError>;
}
