//! Trait abstractions for runtime scheduling
//!
//! The delayed engine invocation goes through an injectable scheduler so
//! tests can control when a reply fires instead of waiting on wall-clock
//! time.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Clock abstraction for scheduled callbacks. `sleep` resolves when the
/// delay has elapsed; the caller then runs the deferred work.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Production scheduler backed by the tokio timer.
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl<T: Scheduler + ?Sized> Scheduler for Arc<T> {
    async fn sleep(&self, delay: Duration) {
        (**self).sleep(delay).await;
    }
}
