//! Bot API wire types

use crate::messages::DEFAULT_USER_NAME;
use crate::runtime::{Button, ChatId, MessageId};
use crate::state_machine::Inbound;
use serde::{Deserialize, Serialize};

// Responses

/// Envelope around every Bot API result
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<u16>,
    pub parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseParameters {
    pub retry_after: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: MessageId,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

impl Update {
    /// Interaction carried by this update, if it is one we handle
    pub fn to_inbound(&self) -> Option<Inbound> {
        if let Some(message) = &self.message {
            let text = message.text.clone()?;
            let user_name = message
                .from
                .as_ref()
                .map_or_else(|| DEFAULT_USER_NAME.to_string(), |user| user.first_name.clone());
            return Some(Inbound::TextCommand {
                chat_id: message.chat.id,
                user_name,
                text,
            });
        }

        let query = self.callback_query.as_ref()?;
        // Private chats share the user's id when the message is too old to be attached
        let chat_id = query
            .message
            .as_ref()
            .map_or(ChatId(query.from.id), |message| message.chat.id);
        Some(Inbound::ButtonPress {
            chat_id,
            payload: query.data.clone()?,
        })
    }
}

// Requests

#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: ChatId,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardMarkup {
    /// All buttons on a single row
    pub fn single_row(buttons: &[Button]) -> Self {
        let row = buttons
            .iter()
            .map(|button| InlineKeyboardButton {
                text: button.label.clone(),
                callback_data: button.payload.clone(),
            })
            .collect();
        Self {
            inline_keyboard: vec![row],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InputMediaPhoto {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media: String,
}

impl InputMediaPhoto {
    pub fn new(media: String) -> Self {
        Self {
            kind: "photo",
            media,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendMediaGroup {
    pub chat_id: ChatId,
    pub media: Vec<InputMediaPhoto>,
}

#[derive(Debug, Serialize)]
pub struct SendPhoto<'a> {
    pub chat_id: ChatId,
    pub photo: String,
    pub caption: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DeleteMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GetUpdates {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}
