use async_trait::async_trait;
use surveyplus_core::Report;

use crate::error::StorageError;

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Save a report, replacing any earlier report for the same study.
    async fn save_report(&self, report: &Report) -> Result<(), StorageError>;

    async fn get_report(&self, study_id: &str) -> Result<Option<Report>, StorageError>;
}
