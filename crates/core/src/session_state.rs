//! Per-interview progress through the question framework.

use serde::{Deserialize, Serialize};

use crate::policy::{Decision, FollowUpPolicy};

/// Where an interview stands: which scripted question, how many follow-ups on it.
///
/// Stored on the interview record. Records saved without it are rebuilt
/// from their participant replies with [`Self::replay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSessionState {
    question_index: usize,
    follow_up_count: u32,
    question_count: usize,
    concluded: bool,
}

/// State change produced by applying a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    FollowedUp { question_index: usize, follow_up_count: u32 },
    Advanced { from: usize, to: usize },
    Concluded { question_index: usize },
}

impl InterviewSessionState {
    #[must_use]
    pub const fn new(question_count: usize) -> Self {
        Self { question_index: 0, follow_up_count: 0, question_count, concluded: false }
    }

    #[must_use]
    pub const fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub const fn follow_up_count(&self) -> u32 {
        self.follow_up_count
    }

    #[must_use]
    pub const fn question_count(&self) -> usize {
        self.question_count
    }

    /// Scripted questions after the current one.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.question_count.saturating_sub(self.question_index.saturating_add(1))
    }

    #[must_use]
    pub const fn is_last_question(&self) -> bool {
        self.remaining() == 0
    }

    #[must_use]
    pub const fn is_concluded(&self) -> bool {
        self.concluded
    }

    /// Applies a policy decision.
    ///
    /// `Advance` on the last question is treated as `Conclude`: there is no
    /// next question to move to. Once concluded the state no longer changes.
    pub fn apply(&mut self, decision: Decision) -> Transition {
        if self.concluded {
            return Transition::Concluded { question_index: self.question_index };
        }
        match decision {
            Decision::FollowUp => {
                self.follow_up_count = self.follow_up_count.saturating_add(1);
                Transition::FollowedUp {
                    question_index: self.question_index,
                    follow_up_count: self.follow_up_count,
                }
            },
            Decision::Advance if !self.is_last_question() => {
                let from = self.question_index;
                self.question_index = from.saturating_add(1);
                self.follow_up_count = 0;
                Transition::Advanced { from, to: self.question_index }
            },
            Decision::Advance | Decision::Conclude => {
                self.concluded = true;
                Transition::Concluded { question_index: self.question_index }
            },
        }
    }

    /// Rebuilds the state reached after `replies`, in order.
    #[must_use]
    pub fn replay<'a>(
        policy: &FollowUpPolicy,
        question_count: usize,
        replies: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let detector = policy.config().detector();
        let mut state = Self::new(question_count);
        for reply in replies {
            if state.concluded {
                break;
            }
            let signals = detector.detect(reply);
            let decision = policy.decide(&signals, state.follow_up_count, state.remaining());
            state.apply(decision);
        }
        state
    }
}
