//! Output formatting for pomodo.
//!
//! This module provides formatters for displaying tasks in various formats,
//! plus the terminal bell rung on session completion.

mod bell;
mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::PomodoError;
use crate::features::tasks::{Summary, Task};

pub use bell::TerminalBell;
pub use json::*;
pub use pretty::*;

/// Format the task list based on output format
///
/// # Errors
///
/// Returns `PomodoError::Parse` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[Task],
    summary: Summary,
    format: OutputFormat,
) -> Result<String, PomodoError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, summary)),
        OutputFormat::Json => format_tasks_json(tasks, summary),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `PomodoError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, PomodoError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => to_json(task),
    }
}
