//! Debouncing of summary passes.
//!
//! The page changes the offer in bursts. Each change reschedules the pending pass so that a
//! burst produces one pass after it settles.

use chrono::Duration;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How long to wait before a summary pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceRules {
    /// The delay when the window is idle. Default is 10 milliseconds.
    pub quick_delay: Duration,
    /// The delay when a pass ran recently or the offer is large. Default is 200 milliseconds.
    pub slow_delay: Duration,
    /// A pass within this long of the last is considered recent. Default is 200 milliseconds.
    pub recent_window: Duration,
    /// An offer with more items than this is considered large. Default is 204.
    pub large_offer_threshold: usize,
}

impl Default for DebounceRules {
    fn default() -> Self {
        Self {
            quick_delay: Duration::milliseconds(10),
            slow_delay: Duration::milliseconds(200),
            recent_window: Duration::milliseconds(200),
            large_offer_threshold: 204,
        }
    }
}

impl DebounceRules {
    /// The delay for a pass given the time since the last pass, if any, and the number of items
    /// in the offer.
    pub fn delay_for(
        &self,
        since_last_pass: Option<std::time::Duration>,
        offer_size: usize,
    ) -> std::time::Duration {
        let recent_window = self.recent_window.to_std().unwrap_or_default();
        let is_recent = since_last_pass
            .map(|elapsed| elapsed <= recent_window)
            .unwrap_or(false);
        let is_large = offer_size > self.large_offer_threshold;
        let delay = if is_recent || is_large {
            self.slow_delay
        } else {
            self.quick_delay
        };

        delay.to_std().unwrap_or_default()
    }
}

/// Schedules summary passes on the tokio runtime. Scheduling a pass cancels the pending one.
#[derive(Debug, Default)]
pub struct SummarizeScheduler {
    rules: DebounceRules,
    last_pass: Arc<Mutex<Option<Instant>>>,
    pending: Option<JoinHandle<()>>,
}

impl SummarizeScheduler {
    pub fn new(rules: DebounceRules) -> Self {
        Self {
            rules,
            last_pass: Arc::new(Mutex::new(None)),
            pending: None,
        }
    }

    pub fn rules(&self) -> &DebounceRules {
        &self.rules
    }

    /// Schedules `task` to run after the delay given by the rules, cancelling any pending task.
    /// Must be called within a tokio runtime. Returns the delay.
    pub fn schedule<F>(&mut self, offer_size: usize, task: F) -> std::time::Duration
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let since_last_pass = self.last_pass
            .lock()
            .unwrap()
            .map(|instant| instant.elapsed());
        let delay = self.rules.delay_for(since_last_pass, offer_size);
        let last_pass = Arc::clone(&self.last_pass);

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task();
            *last_pass.lock().unwrap() = Some(Instant::now());
        }));

        delay
    }

    /// Cancels the pending task.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a task is waiting to run.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for SummarizeScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
