//! Telegram Bot API transport
//!
//! [`TelegramClient`] implements [`Messenger`] over HTTPS and fetches updates
//! for the long-polling loop in [`run_polling`].

mod poller;
mod types;

pub use poller::run_polling;
pub use types::Update;

use crate::deck::Card;
use crate::runtime::{Button, ChatId, MessageId, Messenger, MessengerError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use types::{
    AnswerCallbackQuery, ApiResponse, DeleteMessage, GetUpdates, InlineKeyboardMarkup,
    InputMediaPhoto, Message, SendMediaGroup, SendMessage, SendPhoto,
};

/// Timeout for ordinary API calls; long polls add the poll timeout on top
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

/// How a card image reaches the API
#[derive(Debug, PartialEq, Eq)]
enum PhotoSource {
    /// URL or `file_id`, passed through as a string
    Remote(String),
    /// Local file uploaded as a multipart attachment
    Upload { file_name: String, bytes: Vec<u8> },
}

impl PhotoSource {
    async fn resolve(card: &Card) -> Result<Self, MessengerError> {
        let reference = card.reference();
        let path = Path::new(reference);
        let is_url = reference.starts_with("http://") || reference.starts_with("https://");
        let is_file = tokio::fs::metadata(path)
            .await
            .is_ok_and(|metadata| metadata.is_file());
        if is_url || !is_file {
            return Ok(Self::Remote(reference.to_string()));
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            MessengerError::invalid_request(format!("Failed to read {reference}: {e}"))
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "card".to_string(), |name| name.to_string_lossy().into_owned());
        Ok(Self::Upload { file_name, bytes })
    }

    /// Value for a `media`/`photo` field, attaching the file under `attach_name` if local
    fn into_field(self, attach_name: &str, form: Form) -> (String, Form) {
        match self {
            Self::Remote(reference) => (reference, form),
            Self::Upload { file_name, bytes } => (
                format!("attach://{attach_name}"),
                form.part(attach_name.to_string(), Part::bytes(bytes).file_name(file_name)),
            ),
        }
    }
}

/// Bot API client
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self, MessengerError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MessengerError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{token}", api_url.trim_end_matches('/')),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, MessengerError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.method_url(method)).json(body);
        self.execute(method, request).await
    }

    async fn call_multipart<T>(&self, method: &str, form: Form) -> Result<T, MessengerError>
    where
        T: DeserializeOwned,
    {
        let request = self.client.post(self.method_url(method)).multipart(form);
        self.execute(method, request).await
    }

    async fn execute<T>(
        &self,
        method: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, MessengerError>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MessengerError::network(format!("{method} timed out: {e}"))
            } else if e.is_connect() {
                MessengerError::network(format!("Connection failed: {e}"))
            } else {
                MessengerError::unknown(format!("{method} failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MessengerError::network(format!("Failed to read response: {e}")))?;

        parse_response(status.as_u16(), &body)
    }

    /// Long-poll for updates after `offset`
    pub async fn get_updates(
        &self,
        offset: i64,
        poll_timeout: Duration,
    ) -> Result<Vec<Update>, MessengerError> {
        let body = GetUpdates {
            offset,
            timeout: poll_timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES,
        };
        let request = self
            .client
            .post(self.method_url("getUpdates"))
            .timeout(REQUEST_TIMEOUT + poll_timeout)
            .json(&body);
        self.execute("getUpdates", request).await
    }

    /// Stop the client-side spinner on a pressed button
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), MessengerError> {
        let _: bool = self
            .call("answerCallbackQuery", &AnswerCallbackQuery { callback_query_id })
            .await?;
        Ok(())
    }
}

/// Unwrap the Bot API envelope, classifying failures
fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, MessengerError> {
    let envelope: ApiResponse<T> = serde_json::from_str(body).map_err(|e| {
        if (200..300).contains(&status) {
            MessengerError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        } else {
            MessengerError::from_status(status, format!("HTTP {status}: {body}"))
        }
    })?;

    if envelope.ok {
        return envelope
            .result
            .ok_or_else(|| MessengerError::unknown("Response marked ok without a result"));
    }

    let code = envelope.error_code.unwrap_or(status);
    let description = envelope
        .description
        .unwrap_or_else(|| "no description".to_string());
    let error = MessengerError::from_status(code, format!("{code}: {description}"));
    match envelope.parameters.and_then(|p| p.retry_after) {
        Some(secs) => Err(error.with_retry_after(Duration::from_secs(secs))),
        None => Err(error),
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageId, MessengerError> {
        let message: Message = self
            .call(
                "sendMessage",
                &SendMessage {
                    chat_id,
                    text,
                    reply_markup: None,
                },
            )
            .await?;
        Ok(message.message_id)
    }

    async fn send_media_group(
        &self,
        chat_id: ChatId,
        cards: &[Card],
    ) -> Result<Vec<MessageId>, MessengerError> {
        let mut sources = Vec::with_capacity(cards.len());
        for card in cards {
            sources.push(PhotoSource::resolve(card).await?);
        }

        let has_uploads = sources
            .iter()
            .any(|source| matches!(source, PhotoSource::Upload { .. }));
        let mut form = Form::new();
        let mut media = Vec::with_capacity(sources.len());
        for (i, source) in sources.into_iter().enumerate() {
            let (field, next) = source.into_field(&format!("card{i}"), form);
            form = next;
            media.push(InputMediaPhoto::new(field));
        }

        let messages: Vec<Message> = if has_uploads {
            let media = serde_json::to_string(&media)
                .map_err(|e| MessengerError::unknown(format!("Failed to encode media: {e}")))?;
            let form = form
                .text("chat_id", chat_id.to_string())
                .text("media", media);
            self.call_multipart("sendMediaGroup", form).await?
        } else {
            self.call("sendMediaGroup", &SendMediaGroup { chat_id, media })
                .await?
        };
        Ok(messages.into_iter().map(|m| m.message_id).collect())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        card: &Card,
        caption: &str,
    ) -> Result<MessageId, MessengerError> {
        let message: Message = match PhotoSource::resolve(card).await? {
            PhotoSource::Remote(photo) => {
                self.call(
                    "sendPhoto",
                    &SendPhoto {
                        chat_id,
                        photo,
                        caption,
                    },
                )
                .await?
            }
            upload @ PhotoSource::Upload { .. } => {
                let (field, form) = upload.into_field("photo", Form::new());
                let form = form
                    .text("chat_id", chat_id.to_string())
                    .text("photo", field)
                    .text("caption", caption.to_string());
                self.call_multipart("sendPhoto", form).await?
            }
        };
        Ok(message.message_id)
    }

    async fn send_button_prompt(
        &self,
        chat_id: ChatId,
        text: &str,
        buttons: &[Button],
    ) -> Result<MessageId, MessengerError> {
        let message: Message = self
            .call(
                "sendMessage",
                &SendMessage {
                    chat_id,
                    text,
                    reply_markup: Some(InlineKeyboardMarkup::single_row(buttons)),
                },
            )
            .await?;
        Ok(message.message_id)
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), MessengerError> {
        let _: bool = self
            .call(
                "deleteMessage",
                &DeleteMessage {
                    chat_id,
                    message_id,
                },
            )
            .await?;
        Ok(())
    }
}
