//! Runtime for executing trick sessions
//!
//! Each chat gets its own actor task fed through a channel, so at most one
//! transition per chat is in flight while different chats run in parallel.

mod error;
mod executor;
mod session;
pub mod traits;


pub use error::{MessengerError, MessengerErrorKind};
pub use executor::SessionRuntime;
pub use session::Session;
pub use traits::*;

use crate::deck::CardCatalog;
use crate::state_machine::{Event, Inbound};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, RwLock};

/// Events queued per chat; further events are dropped until the session catches up
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Per-session tunables
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionSettings {
    /// Pause between pile groups; zero disables pacing
    pub pacing: Duration,
    /// Expire sessions that see no events for this long
    pub idle_timeout: Option<Duration>,
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    pub event_tx: mpsc::Sender<Event>,
}

/// Manager for all chat sessions
pub struct SessionManager<M: Messenger + 'static> {
    messenger: Arc<M>,
    catalog: Arc<CardCatalog>,
    settings: SessionSettings,
    sessions: RwLock<HashMap<ChatId, SessionHandle>>,
}

impl<M: Messenger + 'static> SessionManager<M> {
    pub fn new(messenger: Arc<M>, catalog: Arc<CardCatalog>, settings: SessionSettings) -> Self {
        Self {
            messenger,
            catalog,
            settings,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Get the running session for a chat, starting a fresh one if none is alive
    pub async fn get_or_create(&self, chat_id: ChatId) -> Result<SessionHandle, String> {
        // Check if already running
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(&chat_id) {
                if !handle.event_tx.is_closed() {
                    return Ok(handle.clone());
                }
            }
        }

        let mut sessions = self.sessions.write().await;
        // Another dispatch may have started it while we waited for the lock
        if let Some(handle) = sessions.get(&chat_id) {
            if !handle.event_tx.is_closed() {
                return Ok(handle.clone());
            }
        }

        // Drop handles of expired sessions while we hold the write lock
        let before = sessions.len();
        sessions.retain(|_, handle| !handle.event_tx.is_closed());
        let pruned = before - sessions.len();

        let deck = self
            .catalog
            .shuffled_deck(&mut rand::thread_rng())
            .map_err(|e| format!("Failed to deal a deck: {e}"))?;
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let runtime = SessionRuntime::new(
            Session::new(chat_id, deck),
            Arc::clone(&self.messenger),
            self.settings,
            event_rx,
        );

        tokio::spawn(async move {
            runtime.run().await;
            tracing::debug!(chat_id = %chat_id, "Session task finished");
        });

        let handle = SessionHandle { event_tx };
        sessions.insert(chat_id, handle.clone());
        tracing::info!(
            chat_id = %chat_id,
            active = sessions.len(),
            pruned,
            "Session created"
        );
        Ok(handle)
    }

    /// Route an inbound interaction to its chat's session.
    ///
    /// Never waits on a session: a chat whose queue is full loses the event,
    /// so one busy chat cannot hold up the others.
    pub async fn dispatch(&self, inbound: Inbound) -> Result<(), String> {
        let chat_id = inbound.chat_id();
        let Some(event) = inbound.into_event() else {
            tracing::debug!(chat_id = %chat_id, "Ignoring interaction outside the trick");
            return Ok(());
        };

        let handle = self.get_or_create(chat_id).await?;
        let event = match handle.event_tx.try_send(event) {
            Ok(()) => return Ok(()),
            Err(TrySendError::Full(event)) => {
                tracing::warn!(
                    chat_id = %chat_id,
                    event = ?event,
                    capacity = EVENT_CHANNEL_CAPACITY,
                    "Session queue full, dropping event"
                );
                return Ok(());
            }
            // The session expired between lookup and send; start over once
            Err(TrySendError::Closed(event)) => event,
        };

        self.get_or_create(chat_id)
            .await?
            .event_tx
            .try_send(event)
            .map_err(|e| format!("Failed to send event: {e}"))
    }

    /// Number of live sessions
    pub async fn active_sessions(&self) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|handle| !handle.event_tx.is_closed())
            .count()
    }

    /// Forget handles whose session task has exited
    pub async fn prune_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| !handle.event_tx.is_closed());
        before - sessions.len()
    }
}
