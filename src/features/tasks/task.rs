//! Task records and their stored form.
//!
//! The collection is stored as one JSON array of
//! `{id, text, completed, createdAt}` objects.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PomodoError;

/// Task identity: the creation time in epoch milliseconds.
pub type TaskId = i64;

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier.
    pub id: TaskId,
    /// Task text, trimmed and never empty.
    pub text: String,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
    /// When the task was added.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Build a task from raw input, trimming it.
    ///
    /// Returns `None` when nothing is left after trimming.
    #[must_use]
    pub fn new(id: TaskId, text: &str, created_at: DateTime<Utc>) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            id,
            text: text.to_string(),
            completed: false,
            created_at,
        })
    }
}

/// ISO-8601 timestamps with millisecond precision, as browsers write them.
mod iso_millis {
    use super::{DateTime, Deserialize, Deserializer, SecondsFormat, Serializer, Utc};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Serialize a collection into the stored JSON array.
///
/// # Errors
///
/// Returns `PomodoError::Parse` if serialization fails.
pub fn to_snapshot(tasks: &[Task]) -> Result<String, PomodoError> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parse a stored JSON array back into a collection.
///
/// # Errors
///
/// Returns `PomodoError::Parse` if the text is not a valid task array.
pub fn from_snapshot(raw: &str) -> Result<Vec<Task>, PomodoError> {
    Ok(serde_json::from_str(raw)?)
}

/// The task counter shown under the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Summary {
    /// No tasks at all
    Empty,
    /// Every task is completed
    AllDone { total: usize },
    /// Some tasks still open
    Remaining { remaining: usize, total: usize },
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "0 tasks"),
            Self::AllDone { .. } => write!(f, "All done! 🎉"),
            Self::Remaining { remaining, total } => {
                write!(f, "{remaining} of {total} remaining")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_new_trims_text() {
        let task = Task::new(1, "  Buy milk \n", at(1)).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn test_new_rejects_blank() {
        assert!(Task::new(1, "", at(1)).is_none());
        assert!(Task::new(1, "   \t", at(1)).is_none());
    }

    #[test]
    fn test_reads_browser_snapshot() {
        let raw = r#"[
            {"id":1718000000123,"text":"Write report","completed":false,"createdAt":"2024-06-10T06:13:20.123Z"},
            {"id":1717999999000,"text":"Buy milk","completed":true,"createdAt":"2024-06-10T06:13:19.000Z"}
        ]"#;

        let tasks = from_snapshot(raw).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 1_718_000_000_123);
        assert_eq!(tasks[0].created_at, at(1_718_000_000_123));
        assert!(tasks[1].completed);
    }

    #[test]
    fn test_snapshot_field_names() {
        let task = Task::new(7, "Stretch", at(7)).unwrap();
        let json = to_snapshot(&[task]).unwrap();

        assert!(json.contains(r#""id":7"#));
        assert!(json.contains(r#""text":"Stretch""#));
        assert!(json.contains(r#""completed":false"#));
        assert!(json.contains(r#""createdAt":"1970-01-01T00:00:00.007Z""#));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut done = Task::new(2, "Second", at(2)).unwrap();
        done.completed = true;
        let tasks = vec![done, Task::new(1, "First", at(1)).unwrap()];

        let restored = from_snapshot(&to_snapshot(&tasks).unwrap()).unwrap();
        assert_eq!(restored, tasks);
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(from_snapshot("{not json").is_err());
        assert!(from_snapshot(r#"{"id":1}"#).is_err());
    }

    #[test]
    fn test_summary_display() {
        assert_eq!(Summary::Empty.to_string(), "0 tasks");
        assert!(Summary::AllDone { total: 3 }.to_string().starts_with("All done"));
        assert_eq!(
            Summary::Remaining {
                remaining: 2,
                total: 3
            }
            .to_string(),
            "2 of 3 remaining"
        );
    }
}
