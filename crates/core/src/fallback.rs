//! Canned interviewer turns for when the text-generation backend fails.

use crate::constants::{FALLBACK_ADVANCE_PREFIX, FALLBACK_CONCLUDE, FALLBACK_FOLLOW_UP};
use crate::policy::Decision;

/// Picks the canned utterance for `decision`.
///
/// `next_question` is the scripted question after the current one. An
/// `Advance` with no next question is a conclusion.
#[must_use]
pub fn fallback_utterance(decision: Decision, next_question: Option<&str>) -> String {
    match (decision, next_question) {
        (Decision::FollowUp, _) => FALLBACK_FOLLOW_UP.to_owned(),
        (Decision::Advance, Some(next)) => format!("{FALLBACK_ADVANCE_PREFIX} {next}"),
        (Decision::Advance | Decision::Conclude, _) => FALLBACK_CONCLUDE.to_owned(),
    }
}
