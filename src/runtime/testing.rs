//! Mock implementations for testing
//!
//! These mocks let tests drive the delayed reply deterministically instead
//! of waiting on real time.

use super::traits::Scheduler;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Scheduler that parks every `sleep` until the test releases it.
///
/// `release` stores a permit, so a release that races ahead of the sleeper
/// is not lost.
pub struct ManualScheduler {
    notify: Notify,
    /// Record of requested delays
    delays: Mutex<Vec<Duration>>,
}

impl ManualScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            notify: Notify::new(),
            delays: Mutex::new(Vec::new()),
        })
    }

    /// Let the next parked (or the next arriving) sleep complete.
    pub fn release(&self) {
        self.notify.notify_one();
    }

    /// Delays requested so far.
    pub fn recorded_delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Scheduler for ManualScheduler {
    async fn sleep(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
        self.notify.notified().await;
    }
}

/// Scheduler that skips delays entirely.
pub struct InstantScheduler;

#[async_trait]
impl Scheduler for InstantScheduler {
    async fn sleep(&self, _delay: Duration) {}
}
