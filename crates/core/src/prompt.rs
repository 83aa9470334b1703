//! Instruction composer: turns a policy decision into the system prompt for
//! the next interviewer turn.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::policy::{Decision, PolicyConfig};
use crate::session_state::InterviewSessionState;
use crate::signals::Signals;
use crate::study::Study;

const PERSONA: &str = "You are an expert user researcher conducting a qualitative interview. \
You're warm, genuinely curious, and skilled at helping people articulate their experiences.";

const PRINCIPLES: &str = "INTERVIEWING PRINCIPLES:
- Listen actively: build on what they just said, show you're paying attention
- Seek specifics: if they're abstract, ask for concrete examples or stories
- Notice emotion: when they express feeling, explore what caused it
- Follow interesting threads: if something seems important to them, dig deeper
- Stay natural: sound like a thoughtful human having a conversation, not a bot running a script
- Be concise: 1-2 sentences max. Get to your question quickly.
- Never lead: don't suggest answers or put words in their mouth
- Don't repeat the same probing word (such as \"why\") turn after turn

STYLE:
- Conversational and warm, not formal or robotic
- \"Can you tell me more about...\" not \"Why did you...\"
- \"What was that like?\" not \"Why?\"";

/// Guidance for a follow-up, picked from the reply's signals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpHint {
    InviteElaboration,
    ProbeRootCause,
    ProbeImpact,
    ProbeMotivation,
    RequestExample,
    FollowThread,
}

impl FollowUpHint {
    /// First matching signal wins: very short, emotional, problem,
    /// workaround, vague. Anything else follows the most interesting thread.
    #[must_use]
    pub const fn select(signals: &Signals) -> Self {
        if signals.is_very_short {
            Self::InviteElaboration
        } else if signals.emotional {
            Self::ProbeRootCause
        } else if signals.problem {
            Self::ProbeImpact
        } else if signals.workaround {
            Self::ProbeMotivation
        } else if signals.vague {
            Self::RequestExample
        } else {
            Self::FollowThread
        }
    }

    #[must_use]
    pub const fn text(&self) -> &'static str {
        match *self {
            Self::InviteElaboration => {
                "Their answer was very brief. Gently invite them to elaborate with an open question like 'Can you tell me more about that?' or 'What was that like for you?'"
            },
            Self::ProbeRootCause => {
                "They mentioned an emotional response. Dig into the root cause: 'What specifically made you feel that way?' or 'Can you walk me through what happened?'"
            },
            Self::ProbeImpact => {
                "They mentioned a problem. Understand the impact: 'How did that affect you?' or 'What did you end up doing?'"
            },
            Self::ProbeMotivation => {
                "They mentioned a workaround. Understand the motivation: 'What made you go with that approach?' or 'How did you figure that out?'"
            },
            Self::RequestExample => {
                "Their answer was a bit vague. Ask for a concrete example: 'Can you give me a specific example?' or 'What does that look like in practice?'"
            },
            Self::FollowThread => {
                "Look for the most interesting thread in their response and pull on it. What would a curious researcher want to understand better?"
            },
        }
    }
}

/// Output of [`InstructionComposer::compose`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedPrompt {
    pub system_prompt: String,
    /// The decision-specific task line embedded in `system_prompt`.
    pub instruction: String,
    /// Set only for follow-ups.
    pub hint: Option<FollowUpHint>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InstructionComposer {
    config: PolicyConfig,
}

impl InstructionComposer {
    #[must_use]
    pub const fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Builds the system prompt for the turn that follows `decision`.
    ///
    /// `state` is the session state *before* the decision is applied, so the
    /// prompt describes the question the participant just answered.
    #[must_use]
    pub fn compose(
        &self,
        study: &Study,
        state: &InterviewSessionState,
        decision: Decision,
        signals: &Signals,
    ) -> ComposedPrompt {
        let (instruction, hint) = Self::instruction(study, state, decision, signals);
        let system_prompt = self.system_prompt(study, state, &instruction);
        ComposedPrompt { system_prompt, instruction, hint }
    }

    fn instruction(
        study: &Study,
        state: &InterviewSessionState,
        decision: Decision,
        signals: &Signals,
    ) -> (String, Option<FollowUpHint>) {
        let next = study.question(state.question_index().saturating_add(1));
        match (decision, next) {
            (Decision::Advance, Some(next)) => (
                format!(
                    "You've explored this well. Acknowledge briefly, then smoothly transition to: \"{next}\""
                ),
                None,
            ),
            // Advance past the last question concludes, same as `InterviewSessionState::apply`.
            (Decision::Advance | Decision::Conclude, _) => (
                "Wrap up now. Warmly thank the participant for their time and let them know the interview is complete."
                    .to_owned(),
                None,
            ),
            (Decision::FollowUp, _) => {
                let hint = FollowUpHint::select(signals);
                (format!("Ask ONE thoughtful follow-up question. {}", hint.text()), Some(hint))
            },
        }
    }

    fn system_prompt(&self, study: &Study, state: &InterviewSessionState, instruction: &str) -> String {
        let current = state.question_index();
        let mut out = String::with_capacity(2048);
        let _ = writeln!(out, "{PERSONA}\n");
        let _ = writeln!(out, "RESEARCH GOAL: {}\n", study.research_goal);

        if !study.research_questions.is_empty() {
            let _ = writeln!(out, "RESEARCH QUESTIONS WE'RE EXPLORING (for your grounding, never read them out):");
            for (i, q) in study.research_questions.iter().enumerate() {
                let _ = writeln!(out, "{}. {q}", i + 1);
            }
            out.push('\n');
        }

        let _ = writeln!(out, "INTERVIEW STRUCTURE:");
        for (i, q) in study.question_framework.iter().enumerate() {
            let marker = if i == current { "  <- current" } else { "" };
            let _ = writeln!(out, "Q{}: {q}{marker}", i + 1);
        }
        out.push('\n');

        let _ = writeln!(
            out,
            "CURRENT STATE: Q{}/{} | Follow-ups: {}/{} | Remaining: {}\n",
            current + 1,
            state.question_count(),
            state.follow_up_count(),
            self.config.cap_for(state.remaining()),
            state.remaining(),
        );
        let _ = writeln!(out, "YOUR TASK: {instruction}\n");
        out.push_str(PRINCIPLES);
        out
    }
}
