//! Periodic tick source for the countdown.
//!
//! The ticker does not own a thread. It keeps the deadline of the next tick
//! and the owner's event loop asks it how many ticks have come due. Cancelling
//! clears the deadline on the spot, so a cancelled ticker can never report a
//! tick afterwards.

use std::time::{Duration, Instant};

/// Default tick period: one second.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A deadline-based repeating tick source.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Arm the ticker so the first tick comes due one period after `now`.
    ///
    /// Re-arming an armed ticker replaces its deadline; there is only ever
    /// one pending schedule.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Cancel any pending tick.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Check if a tick is scheduled.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Instant at which the next tick comes due, if armed.
    #[must_use]
    pub const fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Take the next tick if it is due at `now`.
    ///
    /// Advances the deadline by one period so late polls catch up one tick
    /// at a time, in order.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }

    /// Time remaining until the next tick, or `None` when disarmed.
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self {
            period: TICK_PERIOD,
            next_due: None,
        }
    }
}
