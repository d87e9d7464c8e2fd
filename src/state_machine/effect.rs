//! Effects produced by state transitions

use crate::deck::PileChoice;

/// Effects to be executed after state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Remember the display name used in greetings
    RememberUser { user_name: String },

    /// Send the welcome prompt with the start button
    SendWelcome,

    /// Shuffle the session deck
    Shuffle,

    /// Apply the deal-by-threes regroup for the chosen pile
    Regroup { choice: PileChoice },

    /// Delete every message sent since the last cleanup
    Cleanup,

    /// Send the three piles and the pile prompt for `round`
    PresentPiles { round: u8 },

    /// Send the card at the reveal position
    Reveal,

    /// Cosmetic pause of `beats` pacing intervals
    Pause { beats: u32 },
}
