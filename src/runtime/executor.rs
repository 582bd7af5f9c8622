//! Session runtime executor

use super::traits::Scheduler;
use super::UiEvent;

use crate::engine;
use crate::state_machine::{transition, ChatState, Effect, Event, SessionContext};
use crate::store::{Conversation, Message};
use std::sync::{Arc, RwLock};
use tokio::sync::{broadcast, mpsc};

/// Event loop that owns all mutation of the conversation log.
///
/// There is exactly one logical writer: every store operation happens inside
/// `run`, driven by events off the mpsc channel. The scheduled reply is a
/// spawned task that only sends an event back; it never touches the log.
pub struct ChatRuntime<S>
where
    S: Scheduler + 'static,
{
    context: SessionContext,
    state: ChatState,
    conversation: Arc<RwLock<Conversation>>,
    scheduler: Arc<S>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<UiEvent>,
}

impl<S> ChatRuntime<S>
where
    S: Scheduler + 'static,
{
    pub fn new(
        context: SessionContext,
        conversation: Arc<RwLock<Conversation>>,
        scheduler: S,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
        broadcast_tx: broadcast::Sender<UiEvent>,
    ) -> Self {
        Self {
            context,
            state: ChatState::Idle,
            conversation,
            scheduler: Arc::new(scheduler),
            event_rx,
            event_tx,
            broadcast_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(user = %self.context.username, "Starting chat runtime");

        loop {
            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    if let Err(e) = self.process_event(event) {
                        // Precondition rejections are silent no-ops
                        tracing::debug!(reason = %e, "Submission rejected");
                    }
                }
                else => break,
            }
        }

        tracing::info!(user = %self.context.username, "Chat runtime stopped");
    }

    fn process_event(&mut self, event: Event) -> Result<(), crate::state_machine::TransitionError> {
        let result = transition(&self.state, &self.context, event)?;
        self.state = result.new_state;
        for effect in result.effects {
            self.execute_effect(effect);
        }
        Ok(())
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendUser { text } => {
                self.append(Message::user(text));
            }

            Effect::AppendAssistant { text, is_code } => {
                self.append(Message::assistant(text, is_code));
            }

            Effect::ScheduleReply { utterance, delay } => {
                let scheduler = Arc::clone(&self.scheduler);
                let event_tx = self.event_tx.clone();
                tokio::spawn(async move {
                    scheduler.sleep(delay).await;
                    let reply = engine::classify(&utterance);
                    if event_tx
                        .send(Event::ReplyReady {
                            text: reply.text,
                            is_code: reply.is_code,
                        })
                        .await
                        .is_err()
                    {
                        tracing::debug!("Runtime gone before scheduled reply fired");
                    }
                });
            }

            Effect::ResetLog => {
                let cleared = {
                    let guard = self.conversation.read().unwrap();
                    guard.cleared(&self.context.username)
                };
                match cleared {
                    Ok(fresh) => {
                        let messages = fresh.messages().to_vec();
                        *self.conversation.write().unwrap() = fresh;
                        let _ = self.broadcast_tx.send(UiEvent::Reset { messages });
                    }
                    // Unreachable once the session was seeded, but never panic
                    Err(e) => tracing::error!(error = %e, "Failed to reset log"),
                }
            }

            Effect::RemovePair { pair_index } => {
                let mut guard = self.conversation.write().unwrap();
                let trimmed = guard.without_pair(pair_index);
                let messages = trimmed.messages().to_vec();
                *guard = trimmed;
                drop(guard);
                let _ = self.broadcast_tx.send(UiEvent::Reset { messages });
            }

            Effect::NotifyPending { pending } => {
                let _ = self.broadcast_tx.send(UiEvent::Pending { pending });
            }
        }
    }

    fn append(&self, message: Message) {
        let mut guard = self.conversation.write().unwrap();
        *guard = guard.append(message.clone());
        drop(guard);
        let _ = self.broadcast_tx.send(UiEvent::Message { message });
    }
}
