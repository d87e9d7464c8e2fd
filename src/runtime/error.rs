//! Messenger error types

use std::time::Duration;
use thiserror::Error;

/// Transport error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct MessengerError {
    pub kind: MessengerErrorKind,
    pub message: String,
    pub retry_after: Option<Duration>,
}

impl MessengerError {
    pub fn new(kind: MessengerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retry_after: None,
        }
    }

    pub fn with_retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(MessengerErrorKind::Network, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(MessengerErrorKind::RateLimit, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(MessengerErrorKind::ServerError, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(MessengerErrorKind::Auth, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(MessengerErrorKind::InvalidRequest, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(MessengerErrorKind::Unknown, message)
    }

    /// Classify a Bot API style `(status, description)` failure.
    pub fn from_status(status: u16, description: impl Into<String>) -> Self {
        match status {
            429 => Self::rate_limit(description),
            401 | 403 | 404 => Self::auth(description),
            400..=499 => Self::invalid_request(description),
            500..=599 => Self::server_error(description),
            _ => Self::unknown(description),
        }
    }
}

/// Error classification for transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessengerErrorKind {
    /// Network issues, timeouts
    Network,
    /// Rate limited (429)
    RateLimit,
    /// Server error (5xx)
    ServerError,
    /// Bad or revoked token (401, 403, 404)
    Auth,
    /// Bad request (400), e.g. deleting a message that is already gone
    InvalidRequest,
    Unknown,
}

impl MessengerErrorKind {
    /// Whether a later attempt could succeed; used for polling backoff
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Network | Self::RateLimit | Self::ServerError)
    }
}
