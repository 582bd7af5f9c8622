//! Property-based tests for the submission state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::SessionContext;
use super::transition::{transition, TransitionError, RESPONSE_DELAY};
use super::{ChatState, Effect, Event};
use crate::engine;
use crate::store::{Conversation, Message};
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> SessionContext {
    SessionContext::new("tester")
}

/// Apply an event the way the runtime does: rejections leave state alone,
/// accepted events replace it.
fn step(state: ChatState, event: Event) -> (ChatState, Vec<Effect>) {
    match transition(&state, &test_context(), event) {
        Ok(result) => (result.new_state, result.effects),
        Err(_) => (state, vec![]),
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(|text| Event::Submit { text }),
        ("[a-z ]{1,12}", any::<bool>())
            .prop_map(|(text, is_code)| Event::ReplyReady { text, is_code }),
        Just(Event::Clear),
        (0usize..8).prop_map(|pair_index| Event::DeletePair { pair_index }),
    ]
}

/// Store operations as applied by the runtime's effect interpreter.
#[derive(Debug, Clone)]
enum StoreOp {
    AppendUser(String),
    AppendAssistant(String),
    DeletePair(usize),
    Clear,
}

fn arb_store_op() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        "[a-z ]{1,12}".prop_map(StoreOp::AppendUser),
        "[a-z ]{1,12}".prop_map(StoreOp::AppendAssistant),
        (0usize..8).prop_map(StoreOp::DeletePair),
        Just(StoreOp::Clear),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// The classifier is total: every input yields a non-empty reply.
    #[test]
    fn classify_is_total(utterance in ".*") {
        let reply = engine::classify(&utterance);
        prop_assert!(!reply.text.is_empty());
    }

    /// Any utterance containing a code keyword classifies as code, with all
    /// fence delimiters stripped, no matter what surrounds the keyword.
    #[test]
    fn code_keyword_always_wins(
        prefix in "[a-z ]{0,10}",
        keyword in prop_oneof![Just("code"), Just("IMPLEMENT"), Just("Function")],
        suffix in "[a-z ]{0,10}",
    ) {
        let reply = engine::classify(&format!("{prefix}{keyword}{suffix}"));
        prop_assert!(reply.is_code);
        prop_assert!(!reply.text.contains("```"));
    }

    /// Single-flight: while a reply is outstanding, submissions are always
    /// rejected, and a scheduled reply always uses the canonical delay.
    #[test]
    fn at_most_one_cycle_in_flight(events in prop::collection::vec(arb_event(), 1..30)) {
        let mut state = ChatState::Idle;
        for event in events {
            if let Event::Submit { text } = &event {
                let outcome = transition(&state, &test_context(), event.clone());
                if text.trim().is_empty() {
                    prop_assert_eq!(outcome.unwrap_err(), TransitionError::EmptyUtterance);
                    continue;
                }
                if state.is_pending() {
                    prop_assert_eq!(outcome.unwrap_err(), TransitionError::ReplyOutstanding);
                    continue;
                }
                let result = outcome.unwrap();
                let scheduled = result.effects.iter().any(|e| matches!(
                    e,
                    Effect::ScheduleReply { delay, .. } if *delay == RESPONSE_DELAY
                ));
                prop_assert!(scheduled);
                state = result.new_state;
                prop_assert!(state.is_pending());
            } else {
                (state, _) = step(state, event);
            }
        }
    }

    /// Event sequences never panic and `Clear` and `DeletePair` never
    /// change phase.
    #[test]
    fn clear_and_delete_preserve_phase(events in prop::collection::vec(arb_event(), 1..30)) {
        let mut state = ChatState::Idle;
        for event in events {
            let phase_neutral = matches!(event, Event::Clear | Event::DeletePair { .. });
            let before = state.clone();
            (state, _) = step(state, event);
            if phase_neutral {
                prop_assert_eq!(&state, &before);
            }
        }
    }

    /// Store invariants under arbitrary operation sequences: no panics,
    /// message IDs stay unique, and the seeded greeting guarantees the log
    /// never empties (delete-pair anchors on user messages, so the leading
    /// assistant greeting is unreachable).
    #[test]
    fn store_ops_uphold_invariants(ops in prop::collection::vec(arb_store_op(), 0..30)) {
        let mut conv = Conversation::seeded("alice").unwrap();
        for op in ops {
            conv = match op {
                StoreOp::AppendUser(text) => conv.append(Message::user(text)),
                StoreOp::AppendAssistant(text) => conv.append(Message::assistant(text, false)),
                StoreOp::DeletePair(index) => conv.without_pair(index),
                StoreOp::Clear => conv.cleared("alice").unwrap(),
            };

            prop_assert!(!conv.is_empty());
            let ids: HashSet<&str> = conv.messages().iter().map(|m| m.id.as_str()).collect();
            prop_assert_eq!(ids.len(), conv.len());
        }
    }

    /// Delete-pair removes at most one user message and its follower.
    #[test]
    fn delete_pair_removes_at_most_two(
        pairs in 0usize..5,
        trailing_user in any::<bool>(),
        index in 0usize..8,
    ) {
        let mut conv = Conversation::seeded("alice").unwrap();
        for i in 0..pairs {
            conv = conv.append(Message::user(format!("q{i}")));
            conv = conv.append(Message::assistant(format!("a{i}"), false));
        }
        if trailing_user {
            conv = conv.append(Message::user("unanswered"));
        }

        let trimmed = conv.without_pair(index);
        let removed = conv.len() - trimmed.len();
        prop_assert!(removed <= 2);
        if index >= conv.user_message_count() {
            prop_assert_eq!(removed, 0);
        }
    }
}
