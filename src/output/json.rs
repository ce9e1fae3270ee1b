//! JSON output formatting for pomodo.

use serde::Serialize;
use serde_json::json;

use crate::error::PomodoError;
use crate::features::tasks::{Summary, Task};

/// Format the task list as JSON
///
/// # Errors
///
/// Returns `PomodoError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], summary: Summary) -> Result<String, PomodoError> {
    let output = json!({
        "count": tasks.len(),
        "summary": summary.to_string(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `PomodoError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PomodoError> {
    Ok(serde_json::to_string_pretty(value)?)
}
