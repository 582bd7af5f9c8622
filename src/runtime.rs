//! Runtime for executing a chat session
//!
//! Wires the pure state machine to the conversation log: one event loop per
//! session, an injectable scheduler for the delayed reply, and a broadcast
//! channel rendering collaborators subscribe to.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::ChatRuntime;
pub use traits::{Scheduler, TokioScheduler};

use crate::state_machine::{Event, SessionContext};
use crate::store::{Conversation, Message, StoreError};
use std::sync::{Arc, RwLock};
use tokio::sync::{broadcast, mpsc};

/// Events sent to rendering collaborators
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A message was appended to the log
    Message { message: Message },

    /// The single-flight pending flag changed
    Pending { pending: bool },

    /// The log was rewritten wholesale (clear or delete-pair); re-render
    Reset { messages: Vec<Message> },
}

/// Handle to interact with a running session
///
/// The runtime is the only writer; the handle reads snapshots and feeds
/// events in.
pub struct ChatHandle {
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<UiEvent>,
    conversation: Arc<RwLock<Conversation>>,
}

impl ChatHandle {
    /// Submit an utterance. Empty or mid-flight submissions are silently
    /// dropped by the runtime.
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), String> {
        self.send(Event::Submit { text: text.into() }).await
    }

    /// Reset the log to the seeded greeting.
    pub async fn clear(&self) -> Result<(), String> {
        self.send(Event::Clear).await
    }

    /// Remove the `pair_index`-th exchange (out of range is a no-op).
    pub async fn delete_pair(&self, pair_index: usize) -> Result<(), String> {
        self.send(Event::DeletePair { pair_index }).await
    }

    async fn send(&self, event: Event) -> Result<(), String> {
        self.event_tx
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {e}"))
    }

    /// Subscribe to session updates.
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.broadcast_tx.subscribe()
    }

    /// Current conversation snapshot.
    pub fn snapshot(&self) -> Conversation {
        self.conversation.read().unwrap().clone()
    }

    /// Export the current conversation as plain text.
    pub fn export_text(&self) -> String {
        self.conversation.read().unwrap().export()
    }
}

/// Seed a conversation for `username` and start its runtime in the
/// background. Fails only on an empty username.
pub fn spawn_session<S>(username: &str, scheduler: S) -> Result<ChatHandle, StoreError>
where
    S: Scheduler + 'static,
{
    let conversation = Arc::new(RwLock::new(Conversation::seeded(username)?));
    let context = SessionContext::new(username);

    let (event_tx, event_rx) = mpsc::channel(32);
    let (broadcast_tx, _) = broadcast::channel(128);

    let runtime = ChatRuntime::new(
        context,
        Arc::clone(&conversation),
        scheduler,
        event_rx,
        event_tx.clone(),
        broadcast_tx.clone(),
    );

    tokio::spawn(async move {
        runtime.run().await;
    });

    Ok(ChatHandle {
        event_tx,
        broadcast_tx,
        conversation,
    })
}
