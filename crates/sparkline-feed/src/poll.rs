// File: crates/sparkline-feed/src/poll.rs
// Summary: Fixed-interval background refresh, cancelled when the owning view goes away.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Relative-time labels ("3 min ago") tick this often.
pub const CLOCK_INTERVAL: Duration = Duration::from_secs(60);
/// Per-asset series refresh.
pub const FEED_REFRESH_INTERVAL: Duration = Duration::from_secs(120);
/// Market-wide index refresh.
pub const INDEX_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Owns a polling task. Dropping the handle stops the task.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Run `f` now and then every `interval`. A slow run delays the next tick instead of
    /// bursting to catch up.
    pub fn spawn<F, Fut>(interval: Duration, mut f: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                f().await;
            }
        });
        tracing::debug!(interval_ms = interval.as_millis() as u64, "poll started");
        Self { task }
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool { !self.task.is_finished() }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
