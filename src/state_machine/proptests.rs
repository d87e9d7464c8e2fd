//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary event streams.

use super::*;
use crate::deck::PileChoice;
use proptest::prelude::*;

fn arb_state() -> impl Strategy<Value = TrickState> {
    prop_oneof![
        Just(TrickState::Idle),
        Just(TrickState::AwaitingStart),
        (1..=ROUNDS_PER_TRICK).prop_map(|round| TrickState::RoundInProgress { round }),
    ]
}

fn arb_payload() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("1".to_string()),
        Just("2".to_string()),
        Just("3".to_string()),
        "[0-9a-z_]{0,4}",
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        1 => "[A-Za-z]{1,8}".prop_map(|user_name| Event::Welcome { user_name }),
        2 => Just(Event::StartTrick),
        6 => arb_payload().prop_map(|payload| Event::PileChosen { payload }),
    ]
}

/// Replays a stream, tracking regroups since the last start.
struct Replay {
    state: TrickState,
    regroups_since_start: u32,
    reveals: u32,
}

impl Replay {
    fn new() -> Self {
        Self {
            state: TrickState::Idle,
            regroups_since_start: 0,
            reveals: 0,
        }
    }

    fn apply(&mut self, event: Event) -> Result<(), TestCaseError> {
        let Ok(result) = transition(self.state, event) else {
            return Ok(());
        };
        for effect in &result.effects {
            match effect {
                Effect::Shuffle => self.regroups_since_start = 0,
                Effect::Regroup { .. } => self.regroups_since_start += 1,
                Effect::Reveal => {
                    prop_assert_eq!(self.regroups_since_start, u32::from(ROUNDS_PER_TRICK));
                    self.reveals += 1;
                }
                _ => {}
            }
        }
        self.state = result.new_state;
        Ok(())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn prop_rounds_stay_in_range(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = TrickState::Idle;
        for event in events {
            if let Ok(result) = transition(state, event) {
                state = result.new_state;
            }
            if let Some(round) = state.round() {
                prop_assert!((1..=ROUNDS_PER_TRICK).contains(&round));
            }
        }
    }

    #[test]
    fn prop_reveal_only_after_three_regroups(
        events in proptest::collection::vec(arb_event(), 0..60),
    ) {
        let mut replay = Replay::new();
        for event in events {
            replay.apply(event)?;
        }
    }

    #[test]
    fn prop_rejected_events_have_no_effects(state in arb_state(), payload in arb_payload()) {
        let valid = payload.parse::<PileChoice>().is_ok();
        let result = transition(state, Event::PileChosen { payload });
        match (state, result) {
            (TrickState::RoundInProgress { .. }, Ok(r)) => {
                prop_assert!(valid);
                prop_assert!(
                    matches!(r.effects[0], Effect::Regroup { .. }),
                    "first effect was {:?}",
                    r.effects[0]
                );
            }
            (TrickState::RoundInProgress { .. }, Err(e)) => {
                prop_assert!(!valid);
                prop_assert!(
                    matches!(e, TransitionError::InvalidPileChoice { .. }),
                    "unexpected error: {}",
                    e
                );
            }
            (_, result) => prop_assert!(result.is_err()),
        }
    }

    #[test]
    fn prop_cleanup_precedes_every_presentation(
        state in arb_state(),
        event in arb_event(),
    ) {
        if let Ok(result) = transition(state, event) {
            for (i, effect) in result.effects.iter().enumerate() {
                if let Effect::PresentPiles { .. } = effect {
                    prop_assert!(result.effects[..i].contains(&Effect::Cleanup));
                }
            }
        }
    }
}

#[test]
fn scripted_trick_reveals_once_and_returns_to_idle() {
    let mut replay = Replay::new();
    for event in [
        Event::StartTrick,
        Event::PileChosen { payload: "2".to_string() },
        Event::PileChosen { payload: "1".to_string() },
        Event::PileChosen { payload: "3".to_string() },
    ] {
        replay.apply(event).unwrap();
    }
    assert_eq!(replay.reveals, 1);
    assert_eq!(replay.state, TrickState::Idle);
}
