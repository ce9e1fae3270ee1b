//! State-change notifications emitted by the controller.
//!
//! Presentation layers subscribe an [`Observer`] and redraw or report from
//! the events they receive; the core never renders anything itself.

use serde::Serialize;

use crate::features::focus::Mode;
use crate::features::tasks::TaskId;

/// Status line shown next to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Timer reset and waiting
    Ready,
    /// Focus session counting down
    Focus,
    /// Break counting down
    Break,
    /// Countdown paused
    Paused,
    /// A focus session just finished
    TimeForBreak,
    /// A break just finished
    BreakOver,
}

impl Status {
    /// Status shown while a session of `mode` runs.
    #[must_use]
    pub const fn running(mode: Mode) -> Self {
        if mode.is_break() {
            Self::Break
        } else {
            Self::Focus
        }
    }

    /// Status shown when a session of `mode` completes.
    #[must_use]
    pub const fn completed(mode: Mode) -> Self {
        if mode.is_break() {
            Self::BreakOver
        } else {
            Self::TimeForBreak
        }
    }

    /// Text for the status line.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Ready => "Ready to focus",
            Self::Focus => "Focus time!",
            Self::Break => "Break time!",
            Self::Paused => "Paused",
            Self::TimeForBreak => "Time for a break!",
            Self::BreakOver => "Break is over!",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Something that changed in the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The countdown started or resumed.
    Started { mode: Mode },
    /// One second elapsed.
    Ticked { time_left: u32 },
    /// The countdown was paused.
    Paused { time_left: u32 },
    /// The timer was reset to the full duration of `mode`.
    Reset { mode: Mode },
    /// The mode changed (the timer is reset as well).
    ModeSwitched { mode: Mode },
    /// A session ran out.
    Completed {
        mode: Mode,
        auto_completed: Option<TaskId>,
    },
    /// The task list changed and was persisted.
    TasksChanged,
}

/// Receives controller events.
#[cfg_attr(test, mockall::automock)]
pub trait Observer {
    /// Called after the state change has been applied.
    fn on_event(&mut self, event: &Event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_mode() {
        assert_eq!(Status::running(Mode::Focus), Status::Focus);
        assert_eq!(Status::running(Mode::LongBreak), Status::Break);
        assert_eq!(Status::completed(Mode::Focus), Status::TimeForBreak);
        assert_eq!(Status::completed(Mode::ShortBreak), Status::BreakOver);
    }

    #[test]
    fn test_status_text() {
        assert_eq!(Status::Ready.to_string(), "Ready to focus");
        assert_eq!(Status::Paused.to_string(), "Paused");
        assert_eq!(Status::TimeForBreak.to_string(), "Time for a break!");
    }

    #[test]
    fn test_event_json_shape() {
        let event = Event::Completed {
            mode: Mode::Focus,
            auto_completed: Some(5),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "completed");
        assert_eq!(json["mode"], "focus");
        assert_eq!(json["auto_completed"], 5);
    }
}
