//! Trait abstractions for runtime I/O
//!
//! The session runtime only talks to the chat through [`Messenger`], so it can
//! be driven by a mock in tests.

use super::MessengerError;
use crate::deck::Card;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Chat (conversation) identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a message sent into a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub i64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inline button with the payload delivered back when pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Outbound side of the chat transport
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageId, MessengerError>;

    /// Send cards as one album; returns one id per card, in card order
    async fn send_media_group(
        &self,
        chat_id: ChatId,
        cards: &[Card],
    ) -> Result<Vec<MessageId>, MessengerError>;

    async fn send_photo(
        &self,
        chat_id: ChatId,
        card: &Card,
        caption: &str,
    ) -> Result<MessageId, MessengerError>;

    async fn send_button_prompt(
        &self,
        chat_id: ChatId,
        text: &str,
        buttons: &[Button],
    ) -> Result<MessageId, MessengerError>;

    /// Best-effort delete
    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), MessengerError>;
}

// ============================================================================
// Arc implementation for shared messengers
// ============================================================================

#[async_trait]
impl<T: Messenger + ?Sized> Messenger for Arc<T> {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageId, MessengerError> {
        (**self).send_text(chat_id, text).await
    }

    async fn send_media_group(
        &self,
        chat_id: ChatId,
        cards: &[Card],
    ) -> Result<Vec<MessageId>, MessengerError> {
        (**self).send_media_group(chat_id, cards).await
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        card: &Card,
        caption: &str,
    ) -> Result<MessageId, MessengerError> {
        (**self).send_photo(chat_id, card, caption).await
    }

    async fn send_button_prompt(
        &self,
        chat_id: ChatId,
        text: &str,
        buttons: &[Button],
    ) -> Result<MessageId, MessengerError> {
        (**self).send_button_prompt(chat_id, text, buttons).await
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), MessengerError> {
        (**self).delete_message(chat_id, message_id).await
    }
}
