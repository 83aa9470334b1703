//! Storage layer for surveyplus
//!
//! Async persistence ports for studies, interviews and reports, a SQLite
//! implementation backed by an `r2d2` pool, and an in-memory implementation
//! for tests and ephemeral runs.

mod error;
mod memory;
mod migrations;
mod sqlite_async;
mod sqlite_store;
mod store_traits;
#[cfg(test)]
mod store_tests;

pub use error::StorageError;
pub use memory::InMemoryStorage;
pub use sqlite_store::Storage;
pub use store_traits::{InterviewStore, ReportStore, Store, StudyStore};
