//! User-facing texts and keyboards

use crate::deck::PileChoice;
use crate::runtime::Button;
use crate::state_machine::START_TRICK_PAYLOAD;

/// Used until a `/start` command tells us the user's name
pub const DEFAULT_USER_NAME: &str = "friend";

pub const START_BUTTON_LABEL: &str = "🔹 START 🔹";

pub const PILE_PROMPT: &str = "Which pile holds the card you picked?";

pub const REVEAL_CAPTION: &str = "This is the card you picked 👆";

pub fn welcome(user_name: &str) -> String {
    format!(
        "Welcome, {user_name}! Press the button to begin. \
         Pick one card from the piles that appear and keep it to yourself. \
         Then tell me three times which pile it is in."
    )
}

pub fn pile_header(choice: PileChoice) -> String {
    format!("👇 PILE {choice} 👇")
}

pub fn start_buttons() -> Vec<Button> {
    vec![Button::new(START_BUTTON_LABEL, START_TRICK_PAYLOAD)]
}

/// One button per pile; payloads are exactly `1`, `2`, `3`
pub fn pile_buttons() -> Vec<Button> {
    PileChoice::ALL
        .iter()
        .map(|choice| Button::new(format!("PILE {choice}"), choice.payload()))
        .collect()
}
