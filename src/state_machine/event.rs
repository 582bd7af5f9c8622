//! Events that can occur in a session

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// User submitted an utterance
    Submit { text: String },

    /// The scheduled engine invocation produced its reply
    ReplyReady { text: String, is_code: bool },

    /// User asked for the log to be reset to the seeded greeting
    Clear,

    /// User asked for the `pair_index`-th exchange to be removed
    DeletePair { pair_index: usize },
}
