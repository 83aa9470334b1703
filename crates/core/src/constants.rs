//! Shared constants for surveyplus.
//!
//! Policy defaults. Each one can be overridden through `PolicyConfig::from_env`.

/// Follow-up cap for every question except the last one.
pub const MAX_FOLLOWUPS: u32 = 4;

/// Follow-up cap for the last question. Tighter because there is no next
/// question to fall back on.
pub const MAX_LAST_QUESTION_FOLLOWUPS: u32 = 3;

/// Absolute follow-up ceiling on any question, checked before every other rule.
pub const FOLLOWUP_CEILING: u32 = 5;

/// Follow-ups after which a detailed but unremarkable answer moves the interview on.
pub const DEPTH_FOLLOWUPS: u32 = 2;

/// Word count that counts as a detailed answer for the depth rule.
pub const DEPTH_WORDS: usize = 30;

/// Follow-ups after which a moderately long answer moves the interview on.
pub const SATURATION_FOLLOWUPS: u32 = 3;

/// Word count paired with [`SATURATION_FOLLOWUPS`].
pub const SATURATION_WORDS: usize = 20;

/// Follow-ups after which a detailed reply concludes the last question.
pub const TERMINAL_DETAIL_FOLLOWUPS: u32 = 2;

/// Word count paired with [`TERMINAL_DETAIL_FOLLOWUPS`].
pub const TERMINAL_DETAIL_WORDS: usize = 15;

/// Follow-ups after which a rich reply concludes the last question.
pub const TERMINAL_RICH_FOLLOWUPS: u32 = 1;

/// Word count paired with [`TERMINAL_RICH_FOLLOWUPS`].
pub const TERMINAL_RICH_WORDS: usize = 30;

/// Replies under this many words are short.
pub const SHORT_WORDS: usize = 15;

/// Replies under this many words are very short.
pub const VERY_SHORT_WORDS: usize = 8;

/// Opening interviewer turn, sent before the first scripted question.
pub const WELCOME_MESSAGE: &str = "Thanks for participating! I'll be asking you a few questions about your experience. This should take about 5-10 minutes. Just respond naturally — there are no right or wrong answers.";

/// Interviewer text used when the backend answers with no text at all.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "Thank you for sharing that.";

/// Canned follow-up used when the backend is unavailable.
pub const FALLBACK_FOLLOW_UP: &str = "That's really interesting — can you tell me more about that?";

/// Prefix of the canned transition used when the backend is unavailable.
pub const FALLBACK_ADVANCE_PREFIX: &str = "Thank you for sharing that.";

/// Canned closing line used when the backend is unavailable.
pub const FALLBACK_CONCLUDE: &str =
    "Thank you so much for sharing your experience — this has been really valuable.";
