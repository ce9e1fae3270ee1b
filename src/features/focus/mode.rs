//! Timer modes and their fixed durations.

use chrono::Duration;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A countdown mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// A focused work session.
    #[default]
    #[value(alias = "pomodoro")]
    Focus,
    /// A short break between focus sessions.
    ShortBreak,
    /// A long break after several focus sessions.
    LongBreak,
}

impl Mode {
    /// All modes, in the order they are offered to the user.
    pub const ALL: [Self; 3] = [Self::Focus, Self::ShortBreak, Self::LongBreak];

    /// Duration of this mode in seconds.
    #[must_use]
    pub const fn seconds(self) -> u32 {
        match self {
            Self::Focus => 25 * 60,
            Self::ShortBreak => 5 * 60,
            Self::LongBreak => 15 * 60,
        }
    }

    /// Duration of this mode.
    #[must_use]
    pub fn duration(self) -> Duration {
        Duration::seconds(i64::from(self.seconds()))
    }

    /// Check if this is a break mode.
    #[must_use]
    pub const fn is_break(self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }

    /// Human-friendly name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_durations() {
        assert_eq!(Mode::Focus.seconds(), 1500);
        assert_eq!(Mode::ShortBreak.seconds(), 300);
        assert_eq!(Mode::LongBreak.seconds(), 900);
        assert_eq!(Mode::LongBreak.duration().num_minutes(), 15);
    }

    #[test]
    fn test_mode_is_break() {
        assert!(!Mode::Focus.is_break());
        assert!(Mode::ShortBreak.is_break());
        assert!(Mode::LongBreak.is_break());
    }

    #[test]
    fn test_mode_value_names() {
        assert_eq!(Mode::from_str("focus", true), Ok(Mode::Focus));
        assert_eq!(Mode::from_str("pomodoro", true), Ok(Mode::Focus));
        assert_eq!(Mode::from_str("short-break", true), Ok(Mode::ShortBreak));
        assert_eq!(Mode::from_str("long-break", true), Ok(Mode::LongBreak));
        assert!(Mode::from_str("nap", true).is_err());
    }
}
