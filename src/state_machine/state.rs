//! Session state types

use serde::{Deserialize, Serialize};

/// Submission coordinator state
///
/// `Pending` means a reply is outstanding: the user message has been
/// appended and the engine invocation is scheduled but has not fired yet.
/// Further submissions are rejected until the reply lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatState {
    /// Ready for user input, no reply outstanding
    #[default]
    Idle,

    /// Reply outstanding for this utterance
    Pending { utterance: String },
}

impl ChatState {
    /// Check if a reply is outstanding
    #[allow(dead_code)] // State query utility
    pub fn is_pending(&self) -> bool {
        matches!(self, ChatState::Pending { .. })
    }
}

/// Context for a session (immutable configuration)
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Validated, non-empty username supplied by the session collaborator
    pub username: String,
}

impl SessionContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
