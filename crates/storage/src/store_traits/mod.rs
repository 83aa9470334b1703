//! Persistence ports.
//!
//! One trait per record kind, all async and object-safe so services can hold
//! them as `Arc<dyn ...>`. Saves replace the whole record.

mod interview;
mod report;
mod study;

pub use interview::InterviewStore;
pub use report::ReportStore;
pub use study::StudyStore;

/// Everything the services need from a backend.
pub trait Store: StudyStore + InterviewStore + ReportStore {}

impl<T: StudyStore + InterviewStore + ReportStore> Store for T {}
