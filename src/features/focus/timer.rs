//! Countdown state machine.
//!
//! Provides the timer itself plus clock/duration formatting helpers.

use std::time::Instant;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::mode::Mode;
use super::ticker::Ticker;

/// Run state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Freshly reset, not counting down
    Ready,
    /// Counting down
    Running,
    /// Stopped part way through
    Paused,
}

impl std::fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready => write!(f, "Ready"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// A countdown timer over the three modes.
///
/// `time_left` never exceeds `total`, and the ticker is armed exactly while
/// the status is [`TimerStatus::Running`].
#[derive(Debug, Clone)]
pub struct Timer {
    mode: Mode,
    time_left: u32,
    total: u32,
    status: TimerStatus,
    ticker: Ticker,
}

impl Timer {
    /// Create a ready timer in the given mode.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            time_left: mode.seconds(),
            total: mode.seconds(),
            status: TimerStatus::Ready,
            ticker: Ticker::default(),
        }
    }

    /// Start the countdown, arming the ticker at `now`.
    ///
    /// Returns false without touching the ticker if already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.status = TimerStatus::Running;
        self.ticker.arm(now);
        true
    }

    /// Pause the countdown.
    ///
    /// Returns false if the timer was not running.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.ticker.cancel();
        self.status = TimerStatus::Paused;
        true
    }

    /// Stop and restore the full duration of the current mode.
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.status = TimerStatus::Ready;
        self.total = self.mode.seconds();
        self.time_left = self.total;
    }

    /// Switch to another mode. Always resets, even to the current mode.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// Tick the timer by one second.
    ///
    /// Returns the mode that just completed, if this tick finished the
    /// session. Ticks while not running are ignored.
    pub fn tick(&mut self) -> Option<Mode> {
        if !self.is_running() {
            return None;
        }

        self.time_left = self.time_left.saturating_sub(1);

        if self.time_left == 0 {
            Some(self.complete())
        } else {
            None
        }
    }

    /// End the session: stop the ticker and report the completed mode.
    ///
    /// Mode and remaining time are left as they are.
    pub fn complete(&mut self) -> Mode {
        self.ticker.cancel();
        self.status = TimerStatus::Ready;
        self.mode
    }

    /// Take the next due tick from the ticker, if any.
    pub fn take_due_tick(&mut self, now: Instant) -> bool {
        self.is_running() && self.ticker.take_due(now)
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Remaining seconds.
    #[must_use]
    pub const fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Duration of the current session in seconds.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Current run state.
    #[must_use]
    pub const fn status(&self) -> TimerStatus {
        self.status
    }

    /// Check if the timer is counting down.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// The tick source.
    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Remaining time as a fraction of the session (1.0 down to 0.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.time_left) / f64::from(self.total)
    }

    /// Format remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_clock(self.time_left)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(Mode::Focus)
    }
}

/// Format a number of seconds as MM:SS.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{} minute{}", m, if m == 1 { "" } else { "s" }),
        (h, 0) => format!("{} hour{}", h, if h == 1 { "" } else { "s" }),
        (h, m) => format!(
            "{} hour{}, {} minute{}",
            h,
            if h == 1 { "" } else { "s" },
            m,
            if m == 1 { "" } else { "s" }
        ),
    }
}

/// Render a progress bar for a fraction between 0.0 and 1.0.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let empty = width - filled;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
