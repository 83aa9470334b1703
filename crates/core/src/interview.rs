//! Interview records and transcripts.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::session_state::InterviewSessionState;

/// Who spoke a transcript turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Interviewer,
    Participant,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Interviewer => "interviewer",
            Self::Participant => "participant",
        }
    }

    /// Speaker label used in rendered transcripts.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match *self {
            Self::Interviewer => "Interviewer",
            Self::Participant => "Participant",
        }
    }
}

/// How a turn was produced.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Fixed opening line. Never sent to the backend or included in reports.
    Welcome,
    /// A scripted question shown verbatim.
    Scripted,
    /// Interviewer turn written by the text-generation backend.
    Generated,
    /// Canned interviewer turn used while the backend was failing.
    Fallback,
    /// Participant reply.
    #[default]
    Reply,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    #[default]
    InProgress,
    Complete,
    Abandoned,
}

impl InterviewStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
            Self::Abandoned => "abandoned",
        }
    }
}

impl FromStr for InterviewStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(CoreError::UnknownVariant { kind: "interview status", value: s.to_owned() }),
        }
    }
}

/// One participant's conversation for a study.
///
/// Saved whole after every exchange, so readers never observe a partial turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interview {
    pub id: String,
    pub study_id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub participant_metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub status: InterviewStatus,
    /// Whole seconds between `started_at` and the last save.
    #[serde(default)]
    pub duration_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Scripted questions as they were when the interview started. Later
    /// edits to the study do not reach a running interview.
    #[serde(default)]
    pub question_framework: Vec<String>,
    /// Position in `question_framework` after the last reply. `None` on
    /// records saved before progress was stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<InterviewSessionState>,
}

impl Interview {
    #[must_use]
    pub fn new(
        id: String,
        study_id: String,
        participant_metadata: BTreeMap<String, String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            study_id,
            participant_metadata,
            messages: Vec::new(),
            status: InterviewStatus::InProgress,
            duration_secs: 0,
            ai_summary: None,
            started_at,
            completed_at: None,
            question_framework: Vec::new(),
            progress: None,
        }
    }

    /// Copies `framework` onto the interview and places it on the first question.
    pub fn pin_framework(&mut self, framework: &[String]) {
        self.question_framework = framework.to_vec();
        self.progress = Some(InterviewSessionState::new(framework.len()));
    }

    pub fn push_interviewer(&mut self, kind: MessageKind, text: impl Into<String>, at: DateTime<Utc>) {
        self.messages.push(Message { role: Role::Interviewer, text: text.into(), timestamp: at, kind });
        self.touch(at);
    }

    pub fn push_participant(&mut self, text: impl Into<String>, at: DateTime<Utc>) {
        self.messages.push(Message {
            role: Role::Participant,
            text: text.into(),
            timestamp: at,
            kind: MessageKind::Reply,
        });
        self.touch(at);
    }

    /// Recomputes `duration_secs` relative to `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let secs = now.signed_duration_since(self.started_at).num_seconds();
        self.duration_secs = u64::try_from(secs).unwrap_or(0);
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.status == InterviewStatus::InProgress
    }

    /// `in_progress -> complete`.
    ///
    /// # Errors
    /// `InvalidTransition` if the interview already ended.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.finish(InterviewStatus::Complete, now)
    }

    /// `in_progress -> abandoned`.
    ///
    /// # Errors
    /// `InvalidTransition` if the interview already ended.
    pub fn abandon(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.finish(InterviewStatus::Abandoned, now)
    }

    fn finish(&mut self, to: InterviewStatus, now: DateTime<Utc>) -> Result<()> {
        if !self.is_in_progress() {
            return Err(CoreError::InvalidTransition {
                entity: "interview",
                id: self.id.clone(),
                from: self.status.as_str(),
                to: to.as_str(),
            });
        }
        self.status = to;
        self.completed_at = Some(now);
        self.touch(now);
        Ok(())
    }

    /// Turns that make up the actual conversation (welcome line excluded).
    pub fn conversation(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.kind != MessageKind::Welcome)
    }

    /// Participant replies in order.
    pub fn participant_replies(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().filter(|m| m.role == Role::Participant).map(|m| m.text.as_str())
    }

    /// Renders the conversation as `Speaker: text` paragraphs.
    #[must_use]
    pub fn transcript_text(&self) -> String {
        self.conversation()
            .map(|m| format!("{}: {}", m.role.label(), m.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
