//! The interview loop: reply in, interviewer turn out.
//!
//! Each interview carries the framework it started with and its progress
//! through it, so study edits and policy changes never move a running
//! interview. Records saved without progress are replayed from their
//! participant replies.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use serde::Serialize;
use surveyplus_core::constants::WELCOME_MESSAGE;
use surveyplus_core::{
    CoreError, Decision, FollowUpPolicy, InstructionComposer, Interview, InterviewSessionState,
    MessageKind, PolicyConfig, Signals, Study, Transition, fallback_utterance,
};
use surveyplus_llm::{TextGenerator, interviewer_turn};
use surveyplus_storage::{InterviewStore, Store, StudyStore};

use crate::error::ServiceError;
use crate::observer::{TracingObserver, TransitionEvent, TransitionObserver};

/// Result of one participant reply.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub interview: Interview,
    /// The interviewer turn that was appended.
    pub reply: String,
    pub decision: Decision,
    pub transition: Transition,
    pub signals: Signals,
    pub used_fallback: bool,
}

pub struct InterviewController {
    store: Arc<dyn Store>,
    generator: Arc<dyn TextGenerator>,
    observer: Arc<dyn TransitionObserver>,
    policy: FollowUpPolicy,
    composer: InstructionComposer,
    in_flight: Mutex<HashSet<String>>,
}

/// Marks an interview busy until dropped.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<String>>,
    id: String,
}

impl<'a> InFlight<'a> {
    fn acquire(set: &'a Mutex<HashSet<String>>, id: &str) -> Result<Self, ServiceError> {
        let mut guard = set.lock().unwrap_or_else(PoisonError::into_inner);
        if !guard.insert(id.to_owned()) {
            return Err(ServiceError::Busy(id.to_owned()));
        }
        Ok(Self { set, id: id.to_owned() })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.lock().unwrap_or_else(PoisonError::into_inner).remove(&self.id);
    }
}

impl InterviewController {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, generator: Arc<dyn TextGenerator>, config: PolicyConfig) -> Self {
        Self {
            store,
            generator,
            observer: Arc::new(TracingObserver),
            policy: FollowUpPolicy::new(config),
            composer: InstructionComposer::new(config),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TransitionObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &FollowUpPolicy {
        &self.policy
    }

    async fn load_study(&self, id: &str) -> Result<Study, ServiceError> {
        self.store.get_study(id).await?.ok_or_else(|| ServiceError::not_found("study", id))
    }

    pub async fn get_interview(&self, id: &str) -> Result<Interview, ServiceError> {
        self.store.get_interview(id).await?.ok_or_else(|| ServiceError::not_found("interview", id))
    }

    /// The study as this interview sees it: its framework replaced by the
    /// one pinned at start, plus the interview's current position in it.
    async fn script(&self, interview: &Interview) -> Result<(Study, InterviewSessionState), ServiceError> {
        let mut study = self.load_study(&interview.study_id).await?;
        if !interview.question_framework.is_empty() {
            study.question_framework.clone_from(&interview.question_framework);
        }
        let state = interview.progress.unwrap_or_else(|| {
            InterviewSessionState::replay(
                &self.policy,
                study.question_count(),
                interview.participant_replies(),
            )
        });
        Ok((study, state))
    }

    /// Where an interview currently stands in its framework.
    pub async fn session_state(&self, interview: &Interview) -> Result<InterviewSessionState, ServiceError> {
        Ok(self.script(interview).await?.1)
    }

    /// Opens an interview: the welcome line followed by the first scripted question.
    pub async fn start_interview(
        &self,
        study_id: &str,
        participant_metadata: BTreeMap<String, String>,
    ) -> Result<Interview, ServiceError> {
        let study = self.load_study(study_id).await?;
        if !study.accepts_interviews() {
            return Err(CoreError::StudyNotActive(study.id).into());
        }
        let first = study.question(0).ok_or_else(|| CoreError::EmptyFramework(study.id.clone()))?;

        let now = Utc::now();
        let mut interview =
            Interview::new(uuid::Uuid::new_v4().to_string(), study.id.clone(), participant_metadata, now);
        interview.pin_framework(&study.question_framework);
        interview.push_interviewer(MessageKind::Welcome, WELCOME_MESSAGE, now);
        interview.push_interviewer(MessageKind::Scripted, first, now);
        self.store.save_interview(&interview).await?;

        self.observer.on_started(&interview);
        Ok(interview)
    }

    /// Handles one participant reply and appends the next interviewer turn.
    ///
    /// The whole record (reply, interviewer turn, status, duration) is saved
    /// in one write after the turn is produced. A backend failure never
    /// fails the call; a canned turn picked by the same decision is used.
    pub async fn respond(&self, interview_id: &str, text: &str) -> Result<TurnOutcome, ServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ServiceError::InvalidInput("reply text is empty".to_owned()));
        }
        let _in_flight = InFlight::acquire(&self.in_flight, interview_id)?;

        let mut interview = self.get_interview(interview_id).await?;
        if !interview.is_in_progress() {
            return Err(ServiceError::InvalidInput(format!(
                "interview {interview_id} is {}",
                interview.status.as_str()
            )));
        }
        let (study, mut state) = self.script(&interview).await?;

        let signals = self.policy.config().detector().detect(text);
        if state.is_concluded() {
            return self.close_out(interview, text, state, signals).await;
        }
        let decision = self.policy.decide(&signals, state.follow_up_count(), state.remaining());
        let prompt = self.composer.compose(&study, &state, decision, &signals);
        let from_question = state.question_index();

        interview.push_participant(text, Utc::now());
        let (reply, used_fallback) =
            match interviewer_turn(self.generator.as_ref(), &prompt.system_prompt, interview.conversation())
                .await
            {
                Ok(reply) => (reply, false),
                Err(e) => {
                    self.observer.on_backend_error(interview_id, &e);
                    (fallback_utterance(decision, study.question(from_question.saturating_add(1))), true)
                },
            };

        let now = Utc::now();
        let kind = if used_fallback { MessageKind::Fallback } else { MessageKind::Generated };
        interview.push_interviewer(kind, reply.clone(), now);
        let transition = state.apply(decision);
        interview.progress = Some(state);
        if matches!(transition, Transition::Concluded { .. }) {
            interview.complete(now)?;
        }
        self.store.save_interview(&interview).await?;

        self.observer.on_transition(&TransitionEvent {
            interview_id: interview.id.clone(),
            decision,
            transition,
            from_question,
            to_question: state.question_index(),
            follow_up_count: state.follow_up_count(),
            signals,
            used_fallback,
        });
        if !interview.is_in_progress() {
            self.observer.on_completed(&interview);
        }

        Ok(TurnOutcome { interview, reply, decision, transition, signals, used_fallback })
    }

    /// Completes an in-progress record whose framework is already exhausted,
    /// recording the reply and a canned closing turn.
    async fn close_out(
        &self,
        mut interview: Interview,
        text: &str,
        state: InterviewSessionState,
        signals: Signals,
    ) -> Result<TurnOutcome, ServiceError> {
        tracing::warn!(interview_id = %interview.id, "reply on a concluded interview, completing it");
        let reply = fallback_utterance(Decision::Conclude, None);
        let now = Utc::now();
        interview.push_participant(text, now);
        interview.push_interviewer(MessageKind::Fallback, reply.clone(), now);
        interview.progress = Some(state);
        interview.complete(now)?;
        self.store.save_interview(&interview).await?;
        self.observer.on_completed(&interview);

        let transition = Transition::Concluded { question_index: state.question_index() };
        Ok(TurnOutcome { interview, reply, decision: Decision::Conclude, transition, signals, used_fallback: true })
    }

    /// Ends an in-progress interview without completing it.
    pub async fn abandon(&self, interview_id: &str) -> Result<Interview, ServiceError> {
        let mut interview = self.get_interview(interview_id).await?;
        interview.abandon(Utc::now())?;
        self.store.save_interview(&interview).await?;
        self.observer.on_abandoned(&interview);
        Ok(interview)
    }
}
