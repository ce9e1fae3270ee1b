//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PomodoError;
use crate::features::focus::Mode;
use crate::storage::KeyValueStore;
use crate::tui::app::{App, InputMode};

/// Help text shown in the status bar.
pub const HELP: &str = "s:start | p:pause | space:start/pause | r:reset | 1/2/3:mode | \
     a:add | x:toggle | d:delete | c:clear done | q:quit";

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Add the input as a task.
    CommitInput,
    /// Toggle the selected task.
    ToggleTask,
    /// Delete the selected task.
    DeleteTask,
    /// Remove completed tasks.
    ClearCompleted,
}

/// Wait up to `timeout` for a terminal event and handle it.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<S: KeyValueStore>(
    app: &mut App<S>,
    timeout: Duration,
) -> Result<Option<Action>, PomodoError> {
    if !event::poll(timeout)
        .map_err(|e| PomodoError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    match event::read().map_err(|e| PomodoError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(app, key)),
        _ => Ok(None),
    }
}

/// Apply a key press to `app`.
///
/// Timer keys and navigation are applied directly; anything that persists
/// is returned as an [`Action`].
pub fn handle_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match app.input_mode {
        InputMode::Editing => handle_editing(app, key),
        InputMode::Normal => handle_normal(app, key),
    }
}

fn handle_editing<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => return Some(Action::CommitInput),
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }
    None
}

fn handle_normal<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),

        // Timer
        KeyCode::Char('s') => app.start(),
        KeyCode::Char('p') => app.pause(),
        KeyCode::Char(' ') => app.toggle_running(),
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char('1') => app.switch_mode(Mode::Focus),
        KeyCode::Char('2') => app.switch_mode(Mode::ShortBreak),
        KeyCode::Char('3') => app.switch_mode(Mode::LongBreak),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),

        // Tasks
        KeyCode::Char('a' | 'i') => app.begin_input(),
        KeyCode::Char('x') | KeyCode::Enter => return Some(Action::ToggleTask),
        KeyCode::Char('d') | KeyCode::Delete => return Some(Action::DeleteTask),
        KeyCode::Char('c') => return Some(Action::ClearCompleted),

        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
    None
}
