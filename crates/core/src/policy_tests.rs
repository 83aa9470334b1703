use proptest::prelude::*;

use crate::constants::{FOLLOWUP_CEILING, MAX_FOLLOWUPS, MAX_LAST_QUESTION_FOLLOWUPS};
use crate::{Decision, FollowUpPolicy, InterviewSessionState, PolicyConfig, Signals, detect_signals};

fn words(n: usize) -> Signals {
    Signals { word_count: n, is_short: n < 15, is_very_short: n < 8, ..Signals::default() }
}

fn emotional(n: usize) -> Signals {
    Signals { emotional: true, ..words(n) }
}

#[test]
fn test_terminal_hard_cap() {
    let p = FollowUpPolicy::default();
    for w in [0, 5, 14, 15, 29, 30, 200] {
        assert_eq!(p.decide(&words(w), 3, 0), Decision::Conclude, "w={w}");
    }
}

#[test]
fn test_terminal_rich_reply_concludes_after_one_follow_up() {
    let p = FollowUpPolicy::default();
    assert_eq!(p.decide(&words(35), 1, 0), Decision::Conclude);
    assert_eq!(p.decide(&words(10), 1, 0), Decision::FollowUp);
}

#[test]
fn test_terminal_detailed_reply_concludes_after_two_follow_ups() {
    let p = FollowUpPolicy::default();
    assert_eq!(p.decide(&words(15), 2, 0), Decision::Conclude);
    assert_eq!(p.decide(&words(14), 2, 0), Decision::FollowUp);
}

#[test]
fn test_terminal_first_reply_always_probes() {
    let p = FollowUpPolicy::default();
    assert_eq!(p.decide(&words(500), 0, 0), Decision::FollowUp);
}

#[test]
fn test_terminal_never_advances() {
    let p = FollowUpPolicy::default();
    for f in 0..10 {
        for w in [0, 10, 20, 40] {
            assert_ne!(p.decide(&words(w), f, 0), Decision::Advance);
        }
    }
}

#[test]
fn test_advance_on_boredom() {
    let p = FollowUpPolicy::default();
    assert_eq!(p.decide(&words(35), 2, 2), Decision::Advance);
}

#[test]
fn test_interesting_reply_keeps_probing() {
    let p = FollowUpPolicy::default();
    assert_eq!(p.decide(&emotional(35), 2, 2), Decision::FollowUp);
    let problem = Signals { problem: true, ..words(35) };
    assert_eq!(p.decide(&problem, 2, 2), Decision::FollowUp);
    let workaround = Signals { workaround: true, ..words(35) };
    assert_eq!(p.decide(&workaround, 2, 2), Decision::FollowUp);
}

#[test]
fn test_vague_reply_does_not_block_depth_advance() {
    let p = FollowUpPolicy::default();
    let vague = Signals { vague: true, ..words(35) };
    assert_eq!(p.decide(&vague, 2, 1), Decision::Advance);
}

#[test]
fn test_saturation_advance() {
    let p = FollowUpPolicy::default();
    assert_eq!(p.decide(&emotional(20), 3, 1), Decision::Advance);
    assert_eq!(p.decide(&emotional(19), 3, 1), Decision::FollowUp);
}

#[test]
fn test_max_follow_ups_forces_advance() {
    let p = FollowUpPolicy::default();
    assert_eq!(p.decide(&emotional(1), MAX_FOLLOWUPS, 3), Decision::Advance);
}

#[test]
fn test_short_reply_always_probes() {
    let p = FollowUpPolicy::default();
    for remaining in 1..5 {
        assert_eq!(p.decide(&detect_signals("not really sure"), 0, remaining), Decision::FollowUp);
    }
}

#[test]
fn test_ceiling_wins_over_loose_caps() {
    let config = PolicyConfig {
        max_followups: 50,
        max_last_question_followups: 50,
        saturation_followups: 50,
        depth_followups: 50,
        terminal_detail_followups: 50,
        terminal_rich_followups: 50,
        ..PolicyConfig::default()
    };
    let p = FollowUpPolicy::new(config);
    assert_eq!(p.decide(&words(1), FOLLOWUP_CEILING, 2), Decision::Advance);
    assert_eq!(p.decide(&words(1), FOLLOWUP_CEILING, 0), Decision::Conclude);
    assert_eq!(p.decide(&words(1), FOLLOWUP_CEILING - 1, 0), Decision::FollowUp);
    assert_eq!(p.config().cap_for(2), FOLLOWUP_CEILING);
}

#[test]
fn test_cap_for() {
    let c = PolicyConfig::default();
    assert_eq!(c.cap_for(3), MAX_FOLLOWUPS);
    assert_eq!(c.cap_for(0), MAX_LAST_QUESTION_FOLLOWUPS);
}

#[test]
fn test_config_from_lookup() {
    let c = PolicyConfig::from_lookup(|var| match var {
        "SURVEYPLUS_MAX_FOLLOWUPS" => Some("6".to_owned()),
        "SURVEYPLUS_DEPTH_WORDS" => Some("not-a-number".to_owned()),
        _ => None,
    });
    assert_eq!(c.max_followups, 6);
    assert_eq!(c.depth_words, PolicyConfig::default().depth_words);
    assert_eq!(c.max_last_question_followups, MAX_LAST_QUESTION_FOLLOWUPS);
}

fn arb_signals() -> impl Strategy<Value = Signals> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), 0usize..80).prop_map(
        |(emotional, vague, problem, workaround, n)| Signals {
            emotional,
            vague,
            problem,
            workaround,
            ..words(n)
        },
    )
}

proptest! {
    #[test]
    fn prop_decision_is_deterministic(s in arb_signals(), f in 0u32..8, remaining in 0usize..6) {
        let p = FollowUpPolicy::default();
        prop_assert_eq!(p.decide(&s, f, remaining), p.decide(&s, f, remaining));
    }

    #[test]
    fn prop_interview_terminates_within_caps(
        question_count in 1usize..6,
        replies in proptest::collection::vec(arb_signals(), 0..200),
    ) {
        let p = FollowUpPolicy::default();
        let mut state = InterviewSessionState::new(question_count);
        let mut last_index = 0;
        let mut turns = 0usize;
        for s in &replies {
            if state.is_concluded() {
                break;
            }
            let cap = p.config().cap_for(state.remaining());
            let d = p.decide(s, state.follow_up_count(), state.remaining());
            state.apply(d);
            turns += 1;
            prop_assert!(state.follow_up_count() <= cap);
            prop_assert!(state.follow_up_count() <= FOLLOWUP_CEILING);
            prop_assert!(state.question_index() >= last_index);
            if state.question_index() != last_index {
                prop_assert_eq!(state.follow_up_count(), 0);
            }
            last_index = state.question_index();
        }
        let bound = (question_count - 1) * (MAX_FOLLOWUPS as usize + 1)
            + MAX_LAST_QUESTION_FOLLOWUPS as usize + 1;
        prop_assert!(turns <= bound);
        if replies.len() >= bound {
            prop_assert!(state.is_concluded());
        }
    }
}
