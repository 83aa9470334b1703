//! Hooks fired at every interview state transition.

use serde::Serialize;
use surveyplus_core::{Decision, Interview, Signals, Transition};
use surveyplus_llm::LlmError;

/// What happened on one participant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionEvent {
    pub interview_id: String,
    pub decision: Decision,
    pub transition: Transition,
    /// Question index before the reply was applied.
    pub from_question: usize,
    /// Question index after the reply was applied.
    pub to_question: usize,
    pub follow_up_count: u32,
    pub signals: Signals,
    pub used_fallback: bool,
}

/// Observability port for the interview controller.
///
/// Every method defaults to a no-op so implementations only override what
/// they care about.
pub trait TransitionObserver: Send + Sync {
    fn on_started(&self, _interview: &Interview) {}
    fn on_transition(&self, _event: &TransitionEvent) {}
    fn on_completed(&self, _interview: &Interview) {}
    fn on_abandoned(&self, _interview: &Interview) {}
    fn on_backend_error(&self, _interview_id: &str, _error: &LlmError) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TransitionObserver for NoopObserver {}

/// Emits one structured `tracing` event per hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TransitionObserver for TracingObserver {
    fn on_started(&self, interview: &Interview) {
        tracing::info!(interview_id = %interview.id, study_id = %interview.study_id, "interview started");
    }

    fn on_transition(&self, event: &TransitionEvent) {
        tracing::info!(
            interview_id = %event.interview_id,
            decision = %event.decision,
            from_question = event.from_question,
            to_question = event.to_question,
            follow_up_count = event.follow_up_count,
            word_count = event.signals.word_count,
            emotional = event.signals.emotional,
            vague = event.signals.vague,
            problem = event.signals.problem,
            workaround = event.signals.workaround,
            used_fallback = event.used_fallback,
            "interview transition"
        );
    }

    fn on_completed(&self, interview: &Interview) {
        tracing::info!(
            interview_id = %interview.id,
            duration_secs = interview.duration_secs,
            turns = interview.messages.len(),
            "interview complete"
        );
    }

    fn on_abandoned(&self, interview: &Interview) {
        tracing::info!(interview_id = %interview.id, duration_secs = interview.duration_secs, "interview abandoned");
    }

    fn on_backend_error(&self, interview_id: &str, error: &LlmError) {
        tracing::warn!(interview_id, error = %error, "backend failed, using fallback turn");
    }
}
