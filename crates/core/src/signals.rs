//! Linguistic signal detection over a single participant reply.
//!
//! Each category is a plain list of lowercase phrases. Matching is a
//! case-insensitive substring search, so "hates" and "hated" both hit "hate".
//! The categories are checked independently; one reply can raise several.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{SHORT_WORDS, VERY_SHORT_WORDS};

/// Words that carry feeling about the experience.
pub const EMOTIONAL_PATTERNS: &[&str] = &[
    "frustrated",
    "annoying",
    "love",
    "hate",
    "excited",
    "worried",
    "concerned",
    "difficult",
    "easy",
    "helpful",
    "confusing",
    "satisfying",
    "disappointing",
];

/// Hedges that usually hide the concrete detail.
pub const VAGUE_PATTERNS: &[&str] = &[
    "kind of",
    "sort of",
    "basically",
    "generally",
    "usually",
    "sometimes",
    "stuff",
    "things",
    "a bit",
    "pretty much",
];

/// Mentions of something going wrong.
pub const PROBLEM_PATTERNS: &[&str] = &[
    "problem",
    "issue",
    "challenge",
    "struggle",
    "bug",
    "error",
    "fail",
    "broke",
    "doesn't work",
    "hard to",
    "difficult to",
];

/// Mentions of doing it some other way.
pub const WORKAROUND_PATTERNS: &[&str] = &[
    "instead",
    "workaround",
    "hack",
    "manual",
    "copy",
    "paste",
    "different",
    "another way",
    "found that",
];

/// A named group of trigger phrases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SignalCategory {
    Emotional,
    Vague,
    Problem,
    Workaround,
}

impl SignalCategory {
    pub const ALL: [Self; 4] = [Self::Emotional, Self::Vague, Self::Problem, Self::Workaround];

    #[must_use]
    pub const fn patterns(&self) -> &'static [&'static str] {
        match *self {
            Self::Emotional => EMOTIONAL_PATTERNS,
            Self::Vague => VAGUE_PATTERNS,
            Self::Problem => PROBLEM_PATTERNS,
            Self::Workaround => WORKAROUND_PATTERNS,
        }
    }

    /// Whether `text` contains any phrase of this category.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        let normalized = normalize_apostrophes(text);
        self.regex().is_match(&normalized)
    }

    fn regex(&self) -> &'static Regex {
        match *self {
            Self::Emotional => &EMOTIONAL_REGEX,
            Self::Vague => &VAGUE_REGEX,
            Self::Problem => &PROBLEM_REGEX,
            Self::Workaround => &WORKAROUND_REGEX,
        }
    }
}

#[expect(clippy::unwrap_used, reason = "patterns are escaped literals")]
static EMOTIONAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&alternation(EMOTIONAL_PATTERNS)).unwrap());

#[expect(clippy::unwrap_used, reason = "patterns are escaped literals")]
static VAGUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&alternation(VAGUE_PATTERNS)).unwrap());

#[expect(clippy::unwrap_used, reason = "patterns are escaped literals")]
static PROBLEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&alternation(PROBLEM_PATTERNS)).unwrap());

#[expect(clippy::unwrap_used, reason = "patterns are escaped literals")]
static WORKAROUND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&alternation(WORKAROUND_PATTERNS)).unwrap());

fn alternation(patterns: &[&str]) -> String {
    let body = patterns.iter().map(|p| regex::escape(p)).collect::<Vec<_>>().join("|");
    format!("(?i){body}")
}

/// Phones and word processors substitute U+2019 for `'`; "doesn’t work" must still hit.
fn normalize_apostrophes(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains('\u{2019}') {
        std::borrow::Cow::Owned(text.replace('\u{2019}', "'"))
    } else {
        std::borrow::Cow::Borrowed(text)
    }
}

/// Signals detected in one participant reply.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Signals {
    pub emotional: bool,
    pub vague: bool,
    pub problem: bool,
    pub workaround: bool,
    pub word_count: usize,
    pub is_short: bool,
    pub is_very_short: bool,
}

impl Signals {
    /// Emotional, problem or workaround content. Worth another probe.
    #[must_use]
    pub const fn is_interesting(&self) -> bool {
        self.emotional || self.problem || self.workaround
    }

    /// Categories that fired, in declaration order.
    #[must_use]
    pub fn categories(&self) -> Vec<SignalCategory> {
        SignalCategory::ALL
            .into_iter()
            .filter(|c| match c {
                SignalCategory::Emotional => self.emotional,
                SignalCategory::Vague => self.vague,
                SignalCategory::Problem => self.problem,
                SignalCategory::Workaround => self.workaround,
            })
            .collect()
    }
}

/// Classifies replies. Only the length thresholds are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalDetector {
    pub short_words: usize,
    pub very_short_words: usize,
}

impl Default for SignalDetector {
    fn default() -> Self {
        Self { short_words: SHORT_WORDS, very_short_words: VERY_SHORT_WORDS }
    }
}

impl SignalDetector {
    #[must_use]
    pub fn detect(&self, text: &str) -> Signals {
        let word_count = word_count(text);
        Signals {
            emotional: SignalCategory::Emotional.matches(text),
            vague: SignalCategory::Vague.matches(text),
            problem: SignalCategory::Problem.matches(text),
            workaround: SignalCategory::Workaround.matches(text),
            word_count,
            is_short: word_count < self.short_words,
            is_very_short: word_count < self.very_short_words,
        }
    }
}

/// Detects signals with the default length thresholds.
#[must_use]
pub fn detect_signals(text: &str) -> Signals {
    SignalDetector::default().detect(text)
}

/// Number of whitespace-delimited tokens.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
