//! Application state for the TUI.

use std::time::Instant;

use crate::core::{Completion, Pomodoro};
use crate::error::PomodoError;
use crate::features::focus::Mode;
use crate::features::tasks::Task;
use crate::storage::KeyValueStore;

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys drive the timer and the list.
    Normal,
    /// Keys edit the new-task input.
    Editing,
}

/// Application state.
pub struct App<S> {
    /// Timer and task list.
    pub controller: Pomodoro<S>,
    /// Currently selected task index.
    pub selected: usize,
    /// Current input mode.
    pub input_mode: InputMode,
    /// New-task input buffer.
    pub input: String,
    /// Status message to display.
    pub message: Option<String>,
    /// Whether the key help is shown.
    pub show_help: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Create a new app around `controller`.
    pub fn new(controller: Pomodoro<S>) -> Self {
        Self {
            controller,
            selected: 0,
            input_mode: InputMode::Normal,
            input: String::new(),
            message: Some("Press ? for help".to_string()),
            show_help: false,
        }
    }

    /// Get the currently selected task.
    pub fn selected_task(&self) -> Option<&Task> {
        self.controller.tasks().tasks().get(self.selected)
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        let len = self.controller.tasks().len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    /// Jump to first task.
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Jump to last task.
    pub fn select_last(&mut self) {
        self.selected = self.controller.tasks().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.tasks().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    // ==================== Timer ====================

    /// Start the countdown.
    pub fn start(&mut self) {
        if self.controller.start() {
            self.message = None;
        }
    }

    /// Pause the countdown.
    pub fn pause(&mut self) {
        self.controller.pause();
    }

    /// Start when stopped, pause when running.
    pub fn toggle_running(&mut self) {
        if self.controller.timer().is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Reset the current mode.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.message = None;
    }

    /// Switch to `mode`.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.controller.switch_mode(mode);
        self.message = Some(format!("Switched to {mode}"));
    }

    /// Advance the countdown to `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if an auto-completed task cannot be persisted.
    pub fn on_tick(&mut self, now: Instant) -> Result<(), PomodoError> {
        if let Some(completion) = self.controller.poll(now)? {
            self.message = Some(self.completion_message(completion));
        }
        Ok(())
    }

    fn completion_message(&self, completion: Completion) -> String {
        let status = self.controller.status();
        match completion
            .auto_completed
            .and_then(|id| self.controller.tasks().get(id))
        {
            Some(task) => format!("{status} Checked off: {}", task.text),
            None => status.to_string(),
        }
    }

    // ==================== Tasks ====================

    /// Start editing the new-task input.
    pub fn begin_input(&mut self) {
        self.input_mode = InputMode::Editing;
        self.message = Some("Enter: add | Esc: cancel".to_string());
    }

    /// Leave the input without adding anything.
    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.message = None;
    }

    /// Add the input as a new task and leave the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the task list cannot be persisted.
    pub fn commit_input(&mut self) -> Result<(), PomodoError> {
        let text = std::mem::take(&mut self.input);
        self.input_mode = InputMode::Normal;

        self.message = match self.controller.add_task(&text)? {
            Some(task) => {
                self.selected = 0;
                Some(format!("Added: {}", task.text))
            }
            None => None,
        };
        Ok(())
    }

    /// Toggle the selected task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task list cannot be persisted.
    pub fn toggle_selected(&mut self) -> Result<(), PomodoError> {
        if let Some(task) = self.selected_task() {
            let id = task.id;
            let text = task.text.clone();
            if let Some(completed) = self.controller.toggle_task(id)? {
                let verb = if completed { "Completed" } else { "Reopened" };
                self.message = Some(format!("{verb}: {text}"));
            }
        }
        Ok(())
    }

    /// Delete the selected task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task list cannot be persisted.
    pub fn delete_selected(&mut self) -> Result<(), PomodoError> {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            if let Some(task) = self.controller.delete_task(id)? {
                self.message = Some(format!("Deleted: {}", task.text));
            }
            self.clamp_selection();
        }
        Ok(())
    }

    /// Remove all completed tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the task list cannot be persisted.
    pub fn clear_completed(&mut self) -> Result<(), PomodoError> {
        let cleared = self.controller.clear_completed()?;
        self.message = Some(match cleared {
            0 => "No completed tasks to clear".to_string(),
            1 => "Cleared 1 completed task".to_string(),
            n => format!("Cleared {n} completed tasks"),
        });
        self.clamp_selection();
        Ok(())
    }

    /// Show or hide the key help.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}
