//! Trick state types

/// Rounds of pile choices before the reveal
pub const ROUNDS_PER_TRICK: u8 = 3;

/// Per-chat trick state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrickState {
    /// Nothing on screen that expects an answer
    #[default]
    Idle,

    /// Welcome prompt sent, waiting for the start button
    AwaitingStart,

    /// Piles for `round` (1..=3) are shown, waiting for a pile choice
    RoundInProgress { round: u8 },
}

impl TrickState {
    /// Round currently waiting for an answer
    pub fn round(self) -> Option<u8> {
        match self {
            TrickState::RoundInProgress { round } => Some(round),
            _ => None,
        }
    }

    /// Number of regroups applied in the current trick
    pub fn rounds_completed(self) -> u8 {
        self.round().map_or(0, |round| round - 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            TrickState::Idle => "idle",
            TrickState::AwaitingStart => "awaiting_start",
            TrickState::RoundInProgress { .. } => "round_in_progress",
        }
    }
}
