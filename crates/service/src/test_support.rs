//! Fakes shared by the service tests.

#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use surveyplus_core::{Interview, Study, StudyDraft};
use surveyplus_llm::{CompletionRequest, LlmError, TextGenerator};
use surveyplus_storage::{InMemoryStorage, StudyStore};

use crate::observer::{TransitionEvent, TransitionObserver};

/// Answers every request with the same text, or fails every request.
/// Records what it was asked.
pub struct ScriptedGenerator {
    reply: Option<String>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGenerator {
    pub fn answering(reply: &str) -> Self {
        Self { reply: Some(reply.to_owned()), requests: Mutex::new(Vec::new()) }
    }

    /// Every call fails with a non-retryable status.
    pub fn failing() -> Self {
        Self { reply: None, requests: Mutex::new(Vec::new()) }
    }

    pub fn last_request(&self) -> CompletionRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .ok_or(LlmError::HttpStatus { code: 500, body: "backend down".to_owned() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Started(String),
    Transition(TransitionEvent),
    Completed(String),
    Abandoned(String),
    BackendError(String),
}

#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<Recorded>>,
}

impl RecordingObserver {
    pub fn transitions(&self) -> Vec<TransitionEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Recorded::Transition(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Recorded) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }
}

impl TransitionObserver for RecordingObserver {
    fn on_started(&self, interview: &Interview) {
        self.events.lock().unwrap().push(Recorded::Started(interview.id.clone()));
    }
    fn on_transition(&self, event: &TransitionEvent) {
        self.events.lock().unwrap().push(Recorded::Transition(event.clone()));
    }
    fn on_completed(&self, interview: &Interview) {
        self.events.lock().unwrap().push(Recorded::Completed(interview.id.clone()));
    }
    fn on_abandoned(&self, interview: &Interview) {
        self.events.lock().unwrap().push(Recorded::Abandoned(interview.id.clone()));
    }
    fn on_backend_error(&self, interview_id: &str, _error: &LlmError) {
        self.events.lock().unwrap().push(Recorded::BackendError(interview_id.to_owned()));
    }
}

pub fn draft(questions: &[&str]) -> StudyDraft {
    StudyDraft {
        name: "Onboarding".to_owned(),
        research_goal: "Understand first-week friction".to_owned(),
        research_questions: vec!["Where do new users stall?".to_owned()],
        question_framework: questions.iter().map(|q| (*q).to_owned()).collect(),
    }
}

/// An active study saved into a fresh in-memory store.
pub async fn store_with_active_study(questions: &[&str]) -> (Arc<InMemoryStorage>, Study) {
    let store = Arc::new(InMemoryStorage::new());
    let mut study = Study::new("study-1".to_owned(), draft(questions), Utc::now());
    study.activate(Utc::now()).unwrap();
    store.save_study(&study).await.unwrap();
    (store, study)
}

/// A reply with `n` words and no signal keywords.
pub fn plain_words(n: usize) -> String {
    vec!["lorem"; n].join(" ")
}
