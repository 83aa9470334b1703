//! Follow-up policy: probe deeper or move on.
//!
//! A pure function of the reply's signals, the follow-ups already spent on
//! the current question and the number of scripted questions left after it.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEPTH_FOLLOWUPS, DEPTH_WORDS, FOLLOWUP_CEILING, MAX_FOLLOWUPS, MAX_LAST_QUESTION_FOLLOWUPS,
    SATURATION_FOLLOWUPS, SATURATION_WORDS, SHORT_WORDS, TERMINAL_DETAIL_FOLLOWUPS,
    TERMINAL_DETAIL_WORDS, TERMINAL_RICH_FOLLOWUPS, TERMINAL_RICH_WORDS, VERY_SHORT_WORDS,
};
use crate::env_config::parse_with_default;
use crate::signals::{SignalDetector, Signals};

/// What the interviewer does next.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    FollowUp,
    Advance,
    Conclude,
}

impl Decision {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::FollowUp => "follow_up",
            Self::Advance => "advance",
            Self::Conclude => "conclude",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tuning thresholds for the policy and the signal detector.
///
/// These are product decisions, not invariants, so every one of them can be
/// overridden from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub max_followups: u32,
    pub max_last_question_followups: u32,
    pub followup_ceiling: u32,
    pub depth_followups: u32,
    pub depth_words: usize,
    pub saturation_followups: u32,
    pub saturation_words: usize,
    pub terminal_detail_followups: u32,
    pub terminal_detail_words: usize,
    pub terminal_rich_followups: u32,
    pub terminal_rich_words: usize,
    pub short_words: usize,
    pub very_short_words: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_followups: MAX_FOLLOWUPS,
            max_last_question_followups: MAX_LAST_QUESTION_FOLLOWUPS,
            followup_ceiling: FOLLOWUP_CEILING,
            depth_followups: DEPTH_FOLLOWUPS,
            depth_words: DEPTH_WORDS,
            saturation_followups: SATURATION_FOLLOWUPS,
            saturation_words: SATURATION_WORDS,
            terminal_detail_followups: TERMINAL_DETAIL_FOLLOWUPS,
            terminal_detail_words: TERMINAL_DETAIL_WORDS,
            terminal_rich_followups: TERMINAL_RICH_FOLLOWUPS,
            terminal_rich_words: TERMINAL_RICH_WORDS,
            short_words: SHORT_WORDS,
            very_short_words: VERY_SHORT_WORDS,
        }
    }
}

impl PolicyConfig {
    /// Defaults overlaid with `SURVEYPLUS_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns per variable name.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        macro_rules! field {
            ($var:literal, $default:expr) => {
                parse_with_default($var, lookup($var).as_deref(), $default)
            };
        }
        Self {
            max_followups: field!("SURVEYPLUS_MAX_FOLLOWUPS", d.max_followups),
            max_last_question_followups: field!(
                "SURVEYPLUS_MAX_LAST_QUESTION_FOLLOWUPS",
                d.max_last_question_followups
            ),
            followup_ceiling: field!("SURVEYPLUS_FOLLOWUP_CEILING", d.followup_ceiling),
            depth_followups: field!("SURVEYPLUS_DEPTH_FOLLOWUPS", d.depth_followups),
            depth_words: field!("SURVEYPLUS_DEPTH_WORDS", d.depth_words),
            saturation_followups: field!("SURVEYPLUS_SATURATION_FOLLOWUPS", d.saturation_followups),
            saturation_words: field!("SURVEYPLUS_SATURATION_WORDS", d.saturation_words),
            terminal_detail_followups: field!(
                "SURVEYPLUS_TERMINAL_DETAIL_FOLLOWUPS",
                d.terminal_detail_followups
            ),
            terminal_detail_words: field!(
                "SURVEYPLUS_TERMINAL_DETAIL_WORDS",
                d.terminal_detail_words
            ),
            terminal_rich_followups: field!(
                "SURVEYPLUS_TERMINAL_RICH_FOLLOWUPS",
                d.terminal_rich_followups
            ),
            terminal_rich_words: field!("SURVEYPLUS_TERMINAL_RICH_WORDS", d.terminal_rich_words),
            short_words: field!("SURVEYPLUS_SHORT_WORDS", d.short_words),
            very_short_words: field!("SURVEYPLUS_VERY_SHORT_WORDS", d.very_short_words),
        }
    }

    /// Signal detector using this config's length thresholds.
    #[must_use]
    pub const fn detector(&self) -> SignalDetector {
        SignalDetector { short_words: self.short_words, very_short_words: self.very_short_words }
    }

    /// Effective follow-up cap for a question, ceiling included.
    #[must_use]
    pub fn cap_for(&self, remaining: usize) -> u32 {
        let cap = if remaining == 0 { self.max_last_question_followups } else { self.max_followups };
        cap.min(self.followup_ceiling)
    }
}

/// The decision function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowUpPolicy {
    config: PolicyConfig,
}

impl FollowUpPolicy {
    #[must_use]
    pub const fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Decides the next move for a reply on the current question.
    ///
    /// `remaining` is the number of scripted questions after the current one;
    /// zero means the current question is the last. `Advance` is never
    /// returned when `remaining == 0`.
    #[must_use]
    pub fn decide(&self, signals: &Signals, follow_up_count: u32, remaining: usize) -> Decision {
        let c = &self.config;
        let f = follow_up_count;
        let w = signals.word_count;
        let move_on = if remaining == 0 { Decision::Conclude } else { Decision::Advance };

        if f >= c.followup_ceiling {
            return move_on;
        }

        if remaining == 0 {
            let done = f >= c.max_last_question_followups
                || (f >= c.terminal_detail_followups && w >= c.terminal_detail_words)
                || (f >= c.terminal_rich_followups && w >= c.terminal_rich_words);
            return if done { Decision::Conclude } else { Decision::FollowUp };
        }

        let advance = f >= c.max_followups
            || (f >= c.depth_followups && w >= c.depth_words && !signals.is_interesting())
            || (f >= c.saturation_followups && w >= c.saturation_words);
        if advance { Decision::Advance } else { Decision::FollowUp }
    }
}
