//! trickbot - the 21-card trick as a Telegram bot
//!
//! Each chat runs its own trick session: the bot deals three piles, asks three
//! times which pile holds the user's card, and reveals it.

mod config;
mod deck;
mod messages;
mod runtime;
mod state_machine;
mod telegram;

use config::BotConfig;
use runtime::SessionManager;
use std::sync::Arc;
use telegram::TelegramClient;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trickbot=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = BotConfig::from_env()?;

    let catalog = config.card_catalog()?;
    tracing::info!(
        cards = catalog.cards().len(),
        source = ?config.cards,
        "Card catalog loaded"
    );

    let client = Arc::new(TelegramClient::new(&config.api_url, &config.token)?);
    let settings = config.session_settings();
    let manager = Arc::new(SessionManager::new(
        Arc::clone(&client),
        Arc::new(catalog),
        settings,
    ));
    tracing::info!(
        pacing_ms = u64::try_from(settings.pacing.as_millis()).unwrap_or(u64::MAX),
        idle_timeout_secs = settings.idle_timeout.map(|d| d.as_secs()),
        "Session manager initialized"
    );

    // Shutdown on Ctrl+C
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                return;
            }
            tracing::info!("Shutdown requested");
            cancel.cancel();
        });
    }

    telegram::run_polling(client, manager, config.poll_timeout, cancel).await?;

    tracing::info!("trickbot stopped");
    Ok(())
}
