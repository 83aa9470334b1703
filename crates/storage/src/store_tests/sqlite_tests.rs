#![expect(clippy::unwrap_used, reason = "test code")]

use chrono::Utc;
use surveyplus_core::{
    Decision, InterviewSessionState, InterviewStatus, Report, ReportBody, Role, StudyStatus,
};

use super::{create_test_interview, create_test_storage, create_test_study};
use crate::{InterviewStore, StudyStore};

#[test]
fn test_save_and_get_study() {
    let (storage, _temp_dir) = create_test_storage();
    let mut study = create_test_study("s1");
    study.activate(Utc::now()).unwrap();
    storage.save_study(&study).unwrap();

    let got = storage.get_study("s1").unwrap().unwrap();
    assert_eq!(got.status, StudyStatus::Active);
    assert_eq!(got.question_framework, study.question_framework);
    assert_eq!(got.research_questions, study.research_questions);
    assert!(storage.get_study("missing").unwrap().is_none());
}

#[test]
fn test_interview_round_trip_keeps_transcript() {
    let (storage, _temp_dir) = create_test_storage();
    let mut interview = create_test_interview("i1", "s1");
    interview.participant_metadata.insert("source".to_owned(), "newsletter".to_owned());
    interview.complete(Utc::now()).unwrap();
    storage.save_interview(&interview).unwrap();

    let got = storage.get_interview("i1").unwrap().unwrap();
    assert_eq!(got.status, InterviewStatus::Complete);
    assert_eq!(got.messages.len(), 2);
    assert_eq!(got.messages[1].role, Role::Participant);
    assert_eq!(got.participant_metadata.get("source").map(String::as_str), Some("newsletter"));
    assert!(got.completed_at.is_some());
}

#[test]
fn test_interview_keeps_pinned_framework_and_progress() {
    let (storage, _temp_dir) = create_test_storage();
    let mut interview = create_test_interview("i1", "s1");
    storage.save_interview(&interview).unwrap();
    let got = storage.get_interview("i1").unwrap().unwrap();
    assert!(got.question_framework.is_empty());
    assert!(got.progress.is_none());

    interview.pin_framework(&["Where to?".to_owned(), "Why there?".to_owned()]);
    let mut state = interview.progress.unwrap();
    state.apply(Decision::Advance);
    interview.progress = Some(state);
    storage.save_interview(&interview).unwrap();

    let got = storage.get_interview("i1").unwrap().unwrap();
    assert_eq!(got.question_framework, ["Where to?", "Why there?"]);
    let progress = got.progress.unwrap();
    assert_eq!(progress, state);
    assert_eq!(progress.question_index(), 1);
    assert_ne!(progress, InterviewSessionState::new(2));
}

#[test]
fn test_save_replaces_whole_record() {
    let (storage, _temp_dir) = create_test_storage();
    let mut interview = create_test_interview("i1", "s1");
    storage.save_interview(&interview).unwrap();
    interview.push_participant("And then it rained.", Utc::now());
    storage.save_interview(&interview).unwrap();

    assert_eq!(storage.get_interview("i1").unwrap().unwrap().messages.len(), 3);
    assert_eq!(storage.list_interviews("s1").unwrap().len(), 1);
}

#[test]
fn test_delete_study_cascades() {
    let (storage, _temp_dir) = create_test_storage();
    storage.save_study(&create_test_study("s1")).unwrap();
    storage.save_study(&create_test_study("s2")).unwrap();
    storage.save_interview(&create_test_interview("a", "s1")).unwrap();
    storage.save_interview(&create_test_interview("b", "s1")).unwrap();
    storage.save_interview(&create_test_interview("c", "s2")).unwrap();
    let report =
        Report::assemble("r1".to_owned(), "s1".to_owned(), ReportBody::default(), &[], Utc::now());
    storage.save_report(&report).unwrap();

    assert!(storage.delete_study("s1").unwrap());
    assert!(storage.get_study("s1").unwrap().is_none());
    assert!(storage.list_interviews("s1").unwrap().is_empty());
    assert!(storage.get_report("s1").unwrap().is_none());
    assert_eq!(storage.list_interviews("s2").unwrap().len(), 1);
    assert!(!storage.delete_study("s1").unwrap());
}

#[test]
fn test_one_report_per_study() {
    let (storage, _temp_dir) = create_test_storage();
    for id in ["r1", "r2"] {
        let body = ReportBody { executive_summary: id.to_owned(), ..ReportBody::default() };
        let report = Report::assemble(id.to_owned(), "s1".to_owned(), body, &[], Utc::now());
        storage.save_report(&report).unwrap();
    }
    let got = storage.get_report("s1").unwrap().unwrap();
    assert_eq!(got.id, "r2");
    assert_eq!(got.body.executive_summary, "r2");
}

#[tokio::test]
async fn test_async_traits_delegate() {
    let (storage, _temp_dir) = create_test_storage();
    StudyStore::save_study(&storage, &create_test_study("s1")).await.unwrap();
    InterviewStore::save_interview(&storage, &create_test_interview("i1", "s1")).await.unwrap();

    assert_eq!(StudyStore::list_studies(&storage).await.unwrap().len(), 1);
    assert_eq!(InterviewStore::list_interviews(&storage, "s1").await.unwrap().len(), 1);
    assert!(InterviewStore::delete_interview(&storage, "i1").await.unwrap());
    assert!(InterviewStore::get_interview(&storage, "i1").await.unwrap().is_none());
}
