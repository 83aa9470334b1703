//! Study definition and lifecycle.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Lifecycle state of a study.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StudyStatus {
    #[default]
    Draft,
    Active,
    Complete,
}

impl StudyStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Complete => "complete",
        }
    }
}

impl FromStr for StudyStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "complete" => Ok(Self::Complete),
            _ => Err(CoreError::UnknownVariant { kind: "study status", value: s.to_owned() }),
        }
    }
}

/// A research study: what we want to learn and the script used to learn it.
///
/// `research_questions` are analysis-level and never shown to participants.
/// `question_framework` is the ordered list of scripted prompts that are.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Study {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: StudyStatus,
    pub research_goal: String,
    #[serde(default)]
    pub research_questions: Vec<String>,
    #[serde(default)]
    pub question_framework: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable fields of a study, used for create and update requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyDraft {
    pub name: String,
    pub research_goal: String,
    #[serde(default)]
    pub research_questions: Vec<String>,
    #[serde(default)]
    pub question_framework: Vec<String>,
}

impl Study {
    /// Creates a draft study. Blank framework and research-question entries are dropped.
    #[must_use]
    pub fn new(id: String, draft: StudyDraft, now: DateTime<Utc>) -> Self {
        let mut study = Self {
            id,
            name: String::new(),
            status: StudyStatus::Draft,
            research_goal: String::new(),
            research_questions: Vec::new(),
            question_framework: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        study.apply(draft, now);
        study
    }

    /// Replaces the editable fields. The status is left untouched.
    pub fn apply(&mut self, draft: StudyDraft, now: DateTime<Utc>) {
        self.name = draft.name.trim().to_owned();
        self.research_goal = draft.research_goal.trim().to_owned();
        self.research_questions = clean_lines(draft.research_questions);
        self.question_framework = clean_lines(draft.question_framework);
        self.updated_at = now;
    }

    /// `draft -> active`. Requires at least one scripted question.
    ///
    /// # Errors
    /// `EmptyFramework` when there is nothing to ask, `InvalidTransition` when
    /// the study is already complete.
    pub fn activate(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.question_framework.is_empty() {
            return Err(CoreError::EmptyFramework(self.id.clone()));
        }
        match self.status {
            StudyStatus::Draft | StudyStatus::Active => {
                self.status = StudyStatus::Active;
                self.updated_at = now;
                Ok(())
            },
            StudyStatus::Complete => Err(self.invalid_transition(StudyStatus::Active)),
        }
    }

    /// `active -> complete`.
    ///
    /// # Errors
    /// `InvalidTransition` unless the study is active.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.status != StudyStatus::Active {
            return Err(self.invalid_transition(StudyStatus::Complete));
        }
        self.status = StudyStatus::Complete;
        self.updated_at = now;
        Ok(())
    }

    /// Whether participants may start new interviews.
    #[must_use]
    pub fn accepts_interviews(&self) -> bool {
        self.status == StudyStatus::Active && !self.question_framework.is_empty()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_framework.len()
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&str> {
        self.question_framework.get(index).map(String::as_str)
    }

    fn invalid_transition(&self, to: StudyStatus) -> CoreError {
        CoreError::InvalidTransition {
            entity: "study",
            id: self.id.clone(),
            from: self.status.as_str(),
            to: to.as_str(),
        }
    }
}

fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|l| l.trim().to_owned())
        .filter(|l| !l.is_empty())
        .collect()
}
