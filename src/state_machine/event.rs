//! Events that can occur in a trick conversation

use crate::runtime::ChatId;

/// Button payload that starts a new trick
pub const START_TRICK_PAYLOAD: &str = "start_trick";

const START_COMMAND: &str = "/start";

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `/start` command: greet the user and offer the start button
    Welcome { user_name: String },

    /// Start button pressed: shuffle and show the first round
    StartTrick,

    /// Any other button press; validated as a pile choice by the transition
    PileChosen { payload: String },
}

/// Raw interaction delivered by the chat transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    TextCommand {
        chat_id: ChatId,
        user_name: String,
        text: String,
    },
    ButtonPress {
        chat_id: ChatId,
        payload: String,
    },
}

impl Inbound {
    pub fn chat_id(&self) -> ChatId {
        match self {
            Inbound::TextCommand { chat_id, .. } | Inbound::ButtonPress { chat_id, .. } => *chat_id,
        }
    }

    /// Map to a trick event; text other than `/start` is not part of the trick.
    pub fn into_event(self) -> Option<Event> {
        match self {
            Inbound::TextCommand {
                user_name, text, ..
            } => text
                .trim()
                .eq_ignore_ascii_case(START_COMMAND)
                .then_some(Event::Welcome { user_name }),
            Inbound::ButtonPress { payload, .. } if payload == START_TRICK_PAYLOAD => {
                Some(Event::StartTrick)
            }
            Inbound::ButtonPress { payload, .. } => Some(Event::PileChosen { payload }),
        }
    }
}
