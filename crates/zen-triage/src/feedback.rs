//! Acknowledgement window for the most recent decision.
//!
//! Holds the last committed decision for a fixed window, then clears it.
//! Recording a new decision supersedes the old one and restarts the window,
//! so exactly one expiry is ever outstanding.

use std::time::Duration;

use tokio::time::Instant;
use zen_core::types::Decision;

use crate::timer::Deadline;

/// Default acknowledgement window.
pub const DEFAULT_FEEDBACK_WINDOW: Duration = Duration::from_millis(3000);

/// Displays the most recent decision for a bounded time.
#[derive(Debug, Clone)]
pub struct FeedbackController {
    window: Duration,
    current: Option<Decision>,
    expiry: Deadline,
}

impl Default for FeedbackController {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_WINDOW)
    }
}

impl FeedbackController {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            current: None,
            expiry: Deadline::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Store `decision` and (re)start the expiry from `now`.
    pub fn record(&mut self, decision: Decision, now: Instant) {
        if let Some(previous) = &self.current {
            tracing::debug!(
                superseded = %previous.id,
                by = %decision.id,
                "Feedback superseded before expiry"
            );
        }
        self.current = Some(decision);
        self.expiry.arm(now, self.window);
    }

    /// The decision currently acknowledged, if any.
    pub fn current(&self) -> Option<&Decision> {
        self.current.as_ref()
    }

    /// When the outstanding expiry is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.expiry.due()
    }

    /// Clear the acknowledgement if its window has elapsed.
    ///
    /// Returns the expired decision exactly once.
    pub fn poll_expired(&mut self, now: Instant) -> Option<Decision> {
        if self.expiry.poll(now) {
            self.current.take()
        } else {
            None
        }
    }

    /// Drop the acknowledgement and its pending expiry.
    pub fn cancel(&mut self) {
        self.expiry.cancel();
        self.current = None;
    }
}
