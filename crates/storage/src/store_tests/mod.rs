//! Test utilities and module declarations for storage tests.

use std::collections::BTreeMap;

use chrono::Utc;
use surveyplus_core::{Interview, MessageKind, Study, StudyDraft};
use tempfile::TempDir;

use crate::Storage;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::with_pool_size(&db_path, 2).unwrap();
    (storage, temp_dir)
}

pub fn create_test_study(id: &str) -> Study {
    Study::new(
        id.to_owned(),
        StudyDraft {
            name: format!("Study {id}"),
            research_goal: "Learn how people plan trips".to_owned(),
            research_questions: vec!["What tools do they use?".to_owned()],
            question_framework: vec![
                "Tell me about your last trip.".to_owned(),
                "What was hardest?".to_owned(),
            ],
        },
        Utc::now(),
    )
}

pub fn create_test_interview(id: &str, study_id: &str) -> Interview {
    let now = Utc::now();
    let mut interview = Interview::new(id.to_owned(), study_id.to_owned(), BTreeMap::new(), now);
    interview.push_interviewer(MessageKind::Scripted, "Tell me about your last trip.", now);
    interview.push_participant("We drove to the coast.", now);
    interview
}

mod sqlite_tests;
