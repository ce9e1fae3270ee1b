//! Task command implementation.
//!
//! Handles task list management commands.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, TaskCommands};
use crate::error::PomodoError;
use crate::features::tasks::{TaskId, TaskList};
use crate::output::{format_task, format_tasks, to_json};
use crate::storage::KeyValueStore;

/// Execute task subcommands.
///
/// # Errors
///
/// Returns an error if the task list cannot be persisted or formatted.
pub fn task<S: KeyValueStore>(
    store: S,
    cmd: TaskCommands,
    format: OutputFormat,
) -> Result<String, PomodoError> {
    let mut list = TaskList::load(store);

    match cmd {
        TaskCommands::Add { text } => add_task(&mut list, &text.join(" "), format),
        TaskCommands::List => format_tasks(list.tasks(), list.summary(), format),
        TaskCommands::Toggle { id } => toggle_task(&mut list, id, format),
        TaskCommands::Delete { id } => delete_task(&mut list, id, format),
        TaskCommands::Clear => clear_completed(&mut list, format),
    }
}

fn add_task<S: KeyValueStore>(
    list: &mut TaskList<S>,
    text: &str,
    format: OutputFormat,
) -> Result<String, PomodoError> {
    let added = list.add(text)?;

    match (added, format) {
        (Some(task), OutputFormat::Json) => to_json(&task),
        (Some(task), OutputFormat::Pretty) => Ok(format!(
            "{} {}\n{}",
            "Added:".green(),
            format_task(&task, format)?.trim_end(),
            list.summary().to_string().dimmed()
        )),
        (None, OutputFormat::Json) => Ok("null".to_string()),
        (None, OutputFormat::Pretty) => Ok("Nothing to add".dimmed().to_string()),
    }
}

fn toggle_task<S: KeyValueStore>(
    list: &mut TaskList<S>,
    id: TaskId,
    format: OutputFormat,
) -> Result<String, PomodoError> {
    let Some(completed) = list.toggle(id)? else {
        return Ok(missing(id, format));
    };
    let text = list.get(id).map(|t| t.text.clone()).unwrap_or_default();

    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "completed": completed })),
        OutputFormat::Pretty => {
            let verb = if completed {
                "Completed:".green()
            } else {
                "Reopened:".yellow()
            };
            Ok(format!("{verb} {text}\n{}", list.summary().to_string().dimmed()))
        }
    }
}

fn delete_task<S: KeyValueStore>(
    list: &mut TaskList<S>,
    id: TaskId,
    format: OutputFormat,
) -> Result<String, PomodoError> {
    let Some(task) = list.delete(id)? else {
        return Ok(missing(id, format));
    };

    match format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => Ok(format!("{} {}", "Deleted:".red(), task.text)),
    }
}

fn clear_completed<S: KeyValueStore>(
    list: &mut TaskList<S>,
    format: OutputFormat,
) -> Result<String, PomodoError> {
    let cleared = list.clear_completed()?;

    match format {
        OutputFormat::Json => to_json(&json!({ "cleared": cleared })),
        OutputFormat::Pretty if cleared == 0 => {
            Ok("No completed tasks to clear".dimmed().to_string())
        }
        OutputFormat::Pretty => Ok(format!(
            "Cleared {} completed task{}",
            cleared,
            if cleared == 1 { "" } else { "s" }
        )),
    }
}

fn missing(id: TaskId, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => "null".to_string(),
        OutputFormat::Pretty => format!("No task with id {id}").dimmed().to_string(),
    }
}
