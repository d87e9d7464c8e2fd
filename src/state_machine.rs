//! Trick conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{Event, Inbound, START_TRICK_PAYLOAD};
pub use state::{TrickState, ROUNDS_PER_TRICK};
pub use transition::{transition, TransitionError};
