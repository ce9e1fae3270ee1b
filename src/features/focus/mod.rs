//! Focus timer.
//!
//! Provides the Pomodoro countdown:
//! - Focus, short break and long break modes
//! - Start/pause/reset/switch-mode state machine
//! - A deadline-based one-second tick source

pub mod mode;
pub mod ticker;
pub mod timer;

pub use mode::Mode;
pub use ticker::{Ticker, TICK_PERIOD};
pub use timer::{format_clock, format_duration, render_progress_bar, Timer, TimerStatus};
