//! Study reports synthesised from complete interviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interview::Interview;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub theme: String,
    /// Participants who raised the theme.
    pub count: u32,
    /// Participants considered.
    pub total: u32,
    #[serde(default)]
    pub quotes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub research_question: String,
    pub answer: String,
    #[serde(default)]
    pub themes: Vec<Theme>,
}

/// The analysed part of a report, as produced by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBody {
    pub executive_summary: String,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub unexpected_insights: Vec<String>,
    #[serde(default)]
    pub further_research: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub study_id: String,
    pub participant_count: usize,
    /// Mean interview length as `m:ss`.
    pub avg_duration: String,
    #[serde(flatten)]
    pub body: ReportBody,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Wraps `body` with the figures computed from `interviews`.
    #[must_use]
    pub fn assemble(
        id: String,
        study_id: String,
        body: ReportBody,
        interviews: &[Interview],
        now: DateTime<Utc>,
    ) -> Self {
        let total: u64 = interviews.iter().map(|i| i.duration_secs).sum();
        let avg = total.checked_div(interviews.len() as u64).unwrap_or(0);
        Self {
            id,
            study_id,
            participant_count: interviews.len(),
            avg_duration: format_duration(avg),
            body,
            generated_at: now,
        }
    }
}

/// Formats seconds as `m:ss`.
#[must_use]
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
