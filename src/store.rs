//! Conversation store
//!
//! Authoritative, ordered, immutable-content log of exchanged messages.
//! Every operation is pure: `(state, args) -> new state`. The store does no
//! I/O; `export` returns text and writing it anywhere is a collaborator's
//! job.

use crate::engine::templates;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Timestamp convention used for export entries (local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("username must not be empty")]
    EmptyUsername,
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when rendering or exporting.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "BRD Assistant",
        }
    }
}

/// The atomic unit of conversation. Content is immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Rendering hint, set only on assistant messages classified as code.
    #[serde(default)]
    pub is_code: bool,
}

impl Message {
    fn new(role: Role, content: impl Into<String>, is_code: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            is_code,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, false)
    }

    pub fn assistant(content: impl Into<String>, is_code: bool) -> Self {
        Self::new(Role::Assistant, content, is_code)
    }
}

/// Ordered message log. Insertion order is the sole ordering key; there is
/// no separate sequence number.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// A fresh conversation holding exactly the seeded assistant greeting.
    pub fn seeded(username: &str) -> Result<Self, StoreError> {
        if username.trim().is_empty() {
            return Err(StoreError::EmptyUsername);
        }
        Ok(Self {
            messages: vec![Message::assistant(templates::greeting(username), false)],
        })
    }

    /// New conversation with `message` at the end. Existing entries are
    /// never reordered or mutated. No role-alternation constraint is
    /// enforced here; that protocol lives in the submission coordinator.
    pub fn append(&self, message: Message) -> Self {
        let mut messages = self.messages.clone();
        messages.push(message);
        Self { messages }
    }

    /// Discard everything and re-seed. Equal in content to
    /// `seeded(username)`; there is no undo.
    pub fn cleared(&self, username: &str) -> Result<Self, StoreError> {
        Self::seeded(username)
    }

    /// Remove the `pair_index`-th user message (0-based, counting user-role
    /// messages only) together with the message immediately following it.
    /// Pairing is by adjacency, not by any explicit link: whatever message
    /// sits right after the user message is removed, and an unanswered
    /// trailing user message is removed alone. Out of range is a no-op.
    pub fn without_pair(&self, pair_index: usize) -> Self {
        let Some(pos) = self
            .messages
            .iter()
            .enumerate()
            .filter(|(_, m)| m.role == Role::User)
            .map(|(i, _)| i)
            .nth(pair_index)
        else {
            return self.clone();
        };

        let mut messages = self.messages.clone();
        messages.remove(pos);
        if pos < messages.len() {
            messages.remove(pos);
        }
        Self { messages }
    }

    /// Serialize every message in order as
    /// `"[<local timestamp>] <label>: <content>"`, entries separated by a
    /// blank line.
    pub fn export(&self) -> String {
        self.messages
            .iter()
            .map(|m| {
                format!(
                    "[{}] {}: {}",
                    m.timestamp.with_timezone(&Local).format(TIMESTAMP_FORMAT),
                    m.role.label(),
                    m.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[allow(dead_code)] // Used in tests
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[allow(dead_code)] // Used in tests
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of user-role messages, i.e. the number of addressable pairs.
    pub fn user_message_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == Role::User)
            .count()
    }
}

/// Default export filename for a given date.
pub fn export_filename(date: NaiveDate) -> String {
    format!("brd-conversation-{}.txt", date.format("%Y-%m-%d"))
}
