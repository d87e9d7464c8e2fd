//! Long-polling loop feeding updates into the session manager

use super::{TelegramClient, Update};
use crate::runtime::{MessengerError, SessionManager};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const MAX_BACKOFF: Duration = Duration::from_secs(32);

/// Poll until cancelled.
///
/// Transient failures back off exponentially (1s, 2s, 4s, ...) or for as long
/// as the API asks; anything else, such as a revoked token, stops the loop.
pub async fn run_polling(
    client: Arc<TelegramClient>,
    manager: Arc<SessionManager<TelegramClient>>,
    poll_timeout: Duration,
    cancel: CancellationToken,
) -> Result<(), MessengerError> {
    let mut offset = 0;
    let mut failures = 0u32;
    tracing::info!(poll_timeout_secs = poll_timeout.as_secs(), "Polling for updates");

    loop {
        let batch = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            batch = client.get_updates(offset, poll_timeout) => batch,
        };

        let updates = match batch {
            Ok(updates) => {
                failures = 0;
                updates
            }
            Err(e) if e.kind.is_transient() => {
                failures += 1;
                let delay = e.retry_after.unwrap_or_else(|| backoff(failures));
                tracing::warn!(
                    error = %e,
                    kind = ?e.kind,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "getUpdates failed, backing off"
                );
                tokio::select! {
                    () = cancel.cancelled() => break,
                    () = tokio::time::sleep(delay) => continue,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, kind = ?e.kind, "getUpdates failed permanently");
                return Err(e);
            }
        };

        if updates.is_empty() {
            let pruned = manager.prune_expired().await;
            if pruned > 0 {
                tracing::debug!(
                    pruned,
                    active = manager.active_sessions().await,
                    "Pruned expired sessions"
                );
            }
            continue;
        }

        for update in updates {
            offset = offset.max(update.update_id + 1);
            handle_update(&client, &manager, update).await;
        }
    }

    tracing::info!("Polling stopped");
    Ok(())
}

async fn handle_update(
    client: &TelegramClient,
    manager: &SessionManager<TelegramClient>,
    update: Update,
) {
    if let Some(query) = &update.callback_query {
        if let Err(e) = client.answer_callback_query(&query.id).await {
            tracing::debug!(error = %e, "Failed to answer callback query");
        }
    }

    let Some(inbound) = update.to_inbound() else {
        tracing::debug!(update_id = update.update_id, "Skipping unsupported update");
        return;
    };

    if let Err(e) = manager.dispatch(inbound).await {
        tracing::error!(update_id = update.update_id, error = %e, "Failed to dispatch update");
    }
}

fn backoff(failures: u32) -> Duration {
    Duration::from_secs(1u64 << failures.saturating_sub(1).min(5)).min(MAX_BACKOFF)
}
