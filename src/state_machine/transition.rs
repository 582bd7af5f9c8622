//! Pure state transition function
//!
//! One request/response cycle: a submission appends the user message,
//! schedules the delayed engine invocation, and blocks further submissions
//! until the reply lands. Precondition rejections come back as errors that
//! the runtime treats as silent no-ops.

use super::{ChatState, Effect, Event, SessionContext};
use std::time::Duration;
use thiserror::Error;

/// Delay before a scheduled reply fires.
pub const RESPONSE_DELAY: Duration = Duration::from_millis(1500);

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition. All of these are precondition
/// rejections: no state changes, no message is appended.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("utterance is empty")]
    EmptyUtterance,
    #[error("a reply is already outstanding")]
    ReplyOutstanding,
    #[error("no reply outstanding")]
    NoReplyOutstanding,
}

/// Pure transition function: given the same inputs it always produces the
/// same outputs, with no I/O side effects.
pub fn transition(
    state: &ChatState,
    _context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Empty submissions are rejected regardless of state
        (_, Event::Submit { text }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyUtterance)
        }

        // Idle + Submit -> Pending: append, schedule, single-flight
        (ChatState::Idle, Event::Submit { text }) => {
            Ok(TransitionResult::new(ChatState::Pending {
                utterance: text.clone(),
            })
            .with_effect(Effect::AppendUser { text: text.clone() })
            .with_effect(Effect::ScheduleReply {
                utterance: text,
                delay: RESPONSE_DELAY,
            })
            .with_effect(Effect::NotifyPending { pending: true }))
        }

        // Pending + Submit -> rejected, the in-flight cycle must finish first
        (ChatState::Pending { .. }, Event::Submit { .. }) => {
            Err(TransitionError::ReplyOutstanding)
        }

        // Pending + ReplyReady -> Idle, the cycle completes
        (ChatState::Pending { .. }, Event::ReplyReady { text, is_code }) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::AppendAssistant { text, is_code })
                .with_effect(Effect::NotifyPending { pending: false }))
        }

        // A reply with no outstanding cycle cannot happen under the
        // no-cancellation contract; reject rather than corrupt the log
        (ChatState::Idle, Event::ReplyReady { .. }) => {
            Err(TransitionError::NoReplyOutstanding)
        }

        // Clear and delete are allowed in any state. An in-flight reply is
        // not cancelled and still appends when it fires.
        (state, Event::Clear) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::ResetLog))
        }

        (state, Event::DeletePair { pair_index }) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::RemovePair { pair_index }))
        }
    }
}
