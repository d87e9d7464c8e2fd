//! Environment configuration

use crate::deck::{CardCatalog, DeckError};
use crate::runtime::SessionSettings;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_ASSETS_DIR: &str = "./images";
pub const DEFAULT_ASSET_EXTENSION: &str = ".png";
pub const DEFAULT_PACING_MS: u64 = 500;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Where card images come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardSource {
    /// Scan a directory for image files
    Directory(PathBuf),
    /// `{prefix}{1..=21}{extension}`
    Numbered { prefix: String, extension: String },
}

/// Bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub api_url: String,
    pub cards: CardSource,
    pub pacing: Duration,
    pub poll_timeout: Duration,
    pub session_idle: Option<Duration>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let number = |name: &'static str| -> Result<Option<u64>, ConfigError> {
            var(name)
                .map(|value| {
                    value
                        .trim()
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidNumber { name, value })
                })
                .transpose()
        };

        let token = var("TRICKBOT_TOKEN").ok_or(ConfigError::Missing("TRICKBOT_TOKEN"))?;

        let cards = match var("TRICKBOT_ASSET_PREFIX") {
            Some(prefix) => CardSource::Numbered {
                prefix,
                extension: var("TRICKBOT_ASSET_EXTENSION")
                    .unwrap_or_else(|| DEFAULT_ASSET_EXTENSION.to_string()),
            },
            None => CardSource::Directory(PathBuf::from(
                var("TRICKBOT_ASSETS_DIR").unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string()),
            )),
        };

        Ok(Self {
            token,
            api_url: var("TRICKBOT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            cards,
            pacing: Duration::from_millis(
                number("TRICKBOT_PACING_MS")?.unwrap_or(DEFAULT_PACING_MS),
            ),
            poll_timeout: Duration::from_secs(
                number("TRICKBOT_POLL_TIMEOUT_SECS")?.unwrap_or(DEFAULT_POLL_TIMEOUT_SECS),
            ),
            session_idle: number("TRICKBOT_SESSION_IDLE_SECS")?.map(Duration::from_secs),
        })
    }

    pub fn card_catalog(&self) -> Result<CardCatalog, DeckError> {
        match &self.cards {
            CardSource::Directory(dir) => CardCatalog::from_dir(dir),
            CardSource::Numbered { prefix, extension } => {
                Ok(CardCatalog::numbered(prefix, extension))
            }
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            pacing: self.pacing,
            idle_timeout: self.session_idle,
        }
    }
}
