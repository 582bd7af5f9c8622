//! Effects produced by state transitions

use std::time::Duration;

/// Effects to be executed after a state transition. The transition function
/// stays pure; the runtime interprets these against the conversation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a user message with the raw utterance
    AppendUser { text: String },

    /// Append an assistant message built from an engine reply
    AppendAssistant { text: String, is_code: bool },

    /// Schedule the engine invocation for `utterance` after `delay`.
    /// Once scheduled it always fires; there is no cancellation path.
    ScheduleReply { utterance: String, delay: Duration },

    /// Reset the log to the seeded greeting
    ResetLog,

    /// Remove the `pair_index`-th exchange (out of range is a no-op)
    RemovePair { pair_index: usize },

    /// Notify rendering collaborators of the pending flag
    NotifyPending { pending: bool },
}
