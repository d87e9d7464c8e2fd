//! Per-chat session state

use super::{ChatId, MessageId};
use crate::deck::Deck;
use crate::messages::DEFAULT_USER_NAME;
use crate::state_machine::TrickState;

/// Conversational and game state for one chat
#[derive(Debug, Clone)]
pub struct Session {
    pub chat_id: ChatId,
    pub user_name: String,
    pub state: TrickState,
    pub deck: Deck,
    /// Messages sent since the last cleanup, in send order
    pending_cleanup: Vec<MessageId>,
}

impl Session {
    pub fn new(chat_id: ChatId, deck: Deck) -> Self {
        Self {
            chat_id,
            user_name: DEFAULT_USER_NAME.to_string(),
            state: TrickState::Idle,
            deck,
            pending_cleanup: Vec::new(),
        }
    }

    pub fn track(&mut self, ids: impl IntoIterator<Item = MessageId>) {
        self.pending_cleanup.extend(ids);
    }

    #[cfg(test)]
    pub fn pending_cleanup(&self) -> &[MessageId] {
        &self.pending_cleanup
    }

    /// Drain the cleanup list
    pub fn take_pending(&mut self) -> Vec<MessageId> {
        std::mem::take(&mut self.pending_cleanup)
    }
}
