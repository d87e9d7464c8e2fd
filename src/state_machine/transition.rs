//! Pure state transition function
//!
//! Given the current state and an event, decide the next state and the
//! ordered effects the runtime must execute. No I/O happens here.

use super::{Effect, Event, TrickState, ROUNDS_PER_TRICK};
use crate::deck::PileChoice;
use thiserror::Error;

/// The reveal lingers this many pacing intervals before the welcome prompt
const REVEAL_BEATS: u32 = 2;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: TrickState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: TrickState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid pile choice {payload:?}, expected 1, 2 or 3")]
    InvalidPileChoice { payload: String },
    #[error("No round in progress, pile choice {payload:?} discarded")]
    NoRoundInProgress { payload: String },
}

/// Pure transition function
pub fn transition(state: TrickState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // /start is always accepted and abandons any trick in progress
        (_, Event::Welcome { user_name }) => Ok(TransitionResult::new(TrickState::AwaitingStart)
            .with_effect(Effect::RememberUser { user_name })
            .with_effect(Effect::SendWelcome)),

        // The start button restarts from scratch in any state, clearing an abandoned trick
        (_, Event::StartTrick) => Ok(TransitionResult::new(TrickState::RoundInProgress { round: 1 })
            .with_effects([
                Effect::Cleanup,
                Effect::Shuffle,
                Effect::PresentPiles { round: 1 },
            ])),

        (TrickState::RoundInProgress { round }, Event::PileChosen { payload }) => {
            let choice: PileChoice = payload
                .parse()
                .map_err(|_| TransitionError::InvalidPileChoice { payload })?;

            if round < ROUNDS_PER_TRICK {
                let next = round + 1;
                Ok(TransitionResult::new(TrickState::RoundInProgress { round: next })
                    .with_effects([
                        Effect::Regroup { choice },
                        Effect::Cleanup,
                        Effect::PresentPiles { round: next },
                    ]))
            } else {
                Ok(TransitionResult::new(TrickState::Idle).with_effects([
                    Effect::Regroup { choice },
                    Effect::Cleanup,
                    Effect::Reveal,
                    Effect::Pause {
                        beats: REVEAL_BEATS,
                    },
                    Effect::SendWelcome,
                ]))
            }
        }

        (TrickState::Idle | TrickState::AwaitingStart, Event::PileChosen { payload }) => {
            Err(TransitionError::NoRoundInProgress { payload })
        }
    }
}
