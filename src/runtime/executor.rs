//! Session runtime executor

use super::traits::{ChatId, MessageId, Messenger};
use super::{MessengerError, Session, SessionSettings};

use crate::deck::PileChoice;
use crate::messages;
use crate::state_machine::{transition, Effect, Event};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Actor that owns one chat's session and applies its events serially
pub struct SessionRuntime<M>
where
    M: Messenger + 'static,
{
    session: Session,
    messenger: Arc<M>,
    settings: SessionSettings,
    rng: StdRng,
    event_rx: mpsc::Receiver<Event>,
}

impl<M> SessionRuntime<M>
where
    M: Messenger + 'static,
{
    pub fn new(
        session: Session,
        messenger: Arc<M>,
        settings: SessionSettings,
        event_rx: mpsc::Receiver<Event>,
    ) -> Self {
        Self {
            session,
            messenger,
            settings,
            rng: StdRng::from_entropy(),
            event_rx,
        }
    }

    /// Use a fixed shuffle seed
    #[cfg(test)]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn run(mut self) {
        let chat_id = self.session.chat_id;
        tracing::info!(chat_id = %chat_id, "Starting session runtime");

        loop {
            let next = match self.settings.idle_timeout {
                Some(limit) => match tokio::time::timeout(limit, self.event_rx.recv()).await {
                    Ok(event) => event,
                    Err(_) => {
                        tracing::info!(
                            chat_id = %chat_id,
                            idle_secs = limit.as_secs(),
                            "Session idle, expiring"
                        );
                        self.expire().await;
                        break;
                    }
                },
                None => self.event_rx.recv().await,
            };

            let Some(event) = next else { break };
            self.process_event(event).await;
        }

        tracing::info!(chat_id = %chat_id, "Session runtime stopped");
    }

    /// Stop accepting events, then apply the ones already queued
    pub async fn expire(&mut self) {
        self.event_rx.close();
        while let Ok(event) = self.event_rx.try_recv() {
            self.process_event(event).await;
        }
    }

    /// Apply one event: pure transition, then its effects in order.
    ///
    /// Transport failures inside effects are logged and never roll the state back.
    pub async fn process_event(&mut self, event: Event) {
        let chat_id = self.session.chat_id;
        let result = match transition(self.session.state, event) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(
                    chat_id = %chat_id,
                    state = self.session.state.name(),
                    error = %e,
                    "Event rejected"
                );
                return;
            }
        };

        let old_state = std::mem::replace(&mut self.session.state, result.new_state);
        tracing::debug!(
            chat_id = %chat_id,
            from = ?old_state,
            to = ?self.session.state,
            rounds_completed = self.session.state.rounds_completed(),
            "State transition"
        );

        for effect in result.effects {
            self.execute_effect(effect).await;
        }
    }

    async fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RememberUser { user_name } => {
                self.session.user_name = user_name;
            }

            Effect::SendWelcome => {
                let text = messages::welcome(&self.session.user_name);
                let sent = self
                    .messenger
                    .send_button_prompt(self.session.chat_id, &text, &messages::start_buttons())
                    .await;
                self.track_sent("welcome", sent);
            }

            Effect::Shuffle => {
                self.session.deck.shuffle(&mut self.rng);
                tracing::debug!(chat_id = %self.session.chat_id, "Deck shuffled");
            }

            Effect::Regroup { choice } => {
                self.session.deck.regroup(choice);
                tracing::info!(
                    chat_id = %self.session.chat_id,
                    choice = choice.number(),
                    "Pile chosen"
                );
            }

            Effect::Cleanup => self.cleanup().await,

            Effect::PresentPiles { round } => self.present_piles(round).await,

            Effect::Reveal => {
                let card = self.session.deck.reveal_card();
                tracing::info!(chat_id = %self.session.chat_id, card = %card, "Revealing card");
                // Not tracked: the reveal stays in the chat
                if let Err(e) = self
                    .messenger
                    .send_photo(self.session.chat_id, card, messages::REVEAL_CAPTION)
                    .await
                {
                    log_send_failure(self.session.chat_id, "reveal", &e);
                }
            }

            Effect::Pause { beats } => self.pause(beats).await,
        }
    }

    /// Headers and albums for piles 1, 2, 3, then the pile prompt
    async fn present_piles(&mut self, round: u8) {
        let chat_id = self.session.chat_id;
        tracing::debug!(chat_id = %chat_id, round, "Presenting piles");

        for choice in PileChoice::ALL {
            if choice != PileChoice::First {
                self.pause(1).await;
            }

            let header = messages::pile_header(choice);
            let sent = self.messenger.send_text(chat_id, &header).await;
            self.track_sent("pile header", sent);

            let sent = self
                .messenger
                .send_media_group(chat_id, self.session.deck.pile(choice))
                .await;
            match sent {
                Ok(ids) => self.session.track(ids),
                Err(e) => log_send_failure(chat_id, "pile", &e),
            }
        }

        let sent = self
            .messenger
            .send_button_prompt(chat_id, messages::PILE_PROMPT, &messages::pile_buttons())
            .await;
        self.track_sent("pile prompt", sent);
    }

    /// Delete everything sent since the last cleanup; failures are ignored
    async fn cleanup(&mut self) {
        let chat_id = self.session.chat_id;
        let pending = self.session.take_pending();
        tracing::debug!(chat_id = %chat_id, count = pending.len(), "Cleaning up messages");

        for message_id in pending {
            if let Err(e) = self.messenger.delete_message(chat_id, message_id).await {
                tracing::debug!(
                    chat_id = %chat_id,
                    message_id = %message_id,
                    error = %e,
                    "Delete failed, ignoring"
                );
            }
        }
    }

    async fn pause(&self, beats: u32) {
        if !self.settings.pacing.is_zero() && beats > 0 {
            tokio::time::sleep(self.settings.pacing * beats).await;
        }
    }

    fn track_sent(&mut self, what: &str, sent: Result<MessageId, MessengerError>) {
        match sent {
            Ok(id) => self.session.track([id]),
            Err(e) => log_send_failure(self.session.chat_id, what, &e),
        }
    }
}

fn log_send_failure(chat_id: ChatId, what: &str, error: &MessengerError) {
    tracing::warn!(
        chat_id = %chat_id,
        what,
        kind = ?error.kind,
        error = %error,
        "Failed to send message"
    );
}
