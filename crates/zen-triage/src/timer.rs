//! Scoped timers driven by the host event loop.
//!
//! Nothing here spawns or sleeps. The host asks for the next deadline, waits
//! on it with `tokio::time::sleep_until`, then polls with the current instant.
//! Timestamps come from the tokio clock so paused-time tests control them.

use std::time::Duration;

use tokio::time::Instant;

/// A one-shot deadline with at most one expiry outstanding.
///
/// Arming replaces any pending expiry. A fired or cancelled deadline never
/// fires again until re-armed.
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm to fire `after` from `now`, cancelling any pending expiry.
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.at = Some(now + after);
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// When the pending expiry is due.
    pub fn due(&self) -> Option<Instant> {
        self.at
    }

    /// Time left before expiry, zero once due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(now))
    }

    /// Fire if due. Returns `true` exactly once per arming.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}

/// A free-running fixed-period ticker.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    /// A stopped ticker. Call [`Ticker::start`] to begin.
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    pub fn next_tick(&self) -> Option<Instant> {
        self.next
    }

    /// Number of whole periods elapsed since the last poll.
    ///
    /// Missed periods are counted, not replayed one by one.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(next) = self.next else {
            return 0;
        };
        if now < next || self.period.is_zero() {
            return 0;
        }

        let behind = now.duration_since(next);
        let extra = (behind.as_nanos() / self.period.as_nanos()) as u32;
        let ticks = extra.saturating_add(1);
        self.next = Some(next + self.period * ticks);
        ticks
    }
}
