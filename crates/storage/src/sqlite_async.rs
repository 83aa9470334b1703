//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use surveyplus_core::{Interview, Report, Study};

use crate::Storage;
use crate::error::StorageError;
use crate::store_traits::{InterviewStore, ReportStore, StudyStore};

/// Run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// - `@ref arg` clones a `&T` and passes `&arg`
/// - `@str arg` owns a `&str` and passes `&arg`
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
}

// ── StudyStore ───────────────────────────────────────────────────

#[async_trait]
impl StudyStore for Storage {
    async fn save_study(&self, study: &Study) -> Result<(), StorageError> {
        delegate!(self, save_study, @ref study)
    }
    async fn get_study(&self, id: &str) -> Result<Option<Study>, StorageError> {
        delegate!(self, get_study, @str id)
    }
    async fn list_studies(&self) -> Result<Vec<Study>, StorageError> {
        delegate!(self, list_studies)
    }
    async fn delete_study(&self, id: &str) -> Result<bool, StorageError> {
        delegate!(self, delete_study, @str id)
    }
}

// ── InterviewStore ───────────────────────────────────────────────

#[async_trait]
impl InterviewStore for Storage {
    async fn save_interview(&self, interview: &Interview) -> Result<(), StorageError> {
        delegate!(self, save_interview, @ref interview)
    }
    async fn get_interview(&self, id: &str) -> Result<Option<Interview>, StorageError> {
        delegate!(self, get_interview, @str id)
    }
    async fn list_interviews(&self, study_id: &str) -> Result<Vec<Interview>, StorageError> {
        delegate!(self, list_interviews, @str study_id)
    }
    async fn delete_interview(&self, id: &str) -> Result<bool, StorageError> {
        delegate!(self, delete_interview, @str id)
    }
}

// ── ReportStore ──────────────────────────────────────────────────

#[async_trait]
impl ReportStore for Storage {
    async fn save_report(&self, report: &Report) -> Result<(), StorageError> {
        delegate!(self, save_report, @ref report)
    }
    async fn get_report(&self, study_id: &str) -> Result<Option<Report>, StorageError> {
        delegate!(self, get_report, @str study_id)
    }
}
