//! Submission coordination state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! runtime feeds events in, the transition function returns the next state
//! plus the effects to execute.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ChatState, SessionContext};
pub use transition::{transition, TransitionError, TransitionResult, RESPONSE_DELAY};
