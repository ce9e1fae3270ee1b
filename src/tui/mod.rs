//! Terminal User Interface (TUI) for pomodo.
//!
//! Provides the interactive timer and task list.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, InputMode};

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::UiConfig;
use crate::core::Pomodoro;
use crate::error::PomodoError;
use crate::features::focus::{Mode, Timer};
use crate::output::TerminalBell;
use crate::storage::KeyValueStore;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run<S: KeyValueStore>(store: S, mode: Mode, ui: &UiConfig) -> Result<(), PomodoError> {
    let mut controller = Pomodoro::with_timer(store, Timer::new(mode));
    if ui.bell {
        controller.subscribe(Box::new(TerminalBell::stdout()));
    }
    let mut app = App::new(controller);

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| PomodoError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PomodoError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PomodoError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app, Duration::from_millis(ui.tick_rate_ms));

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    tick_rate: Duration,
) -> Result<(), PomodoError> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomodoError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app, tick_rate)? {
            match action {
                event::Action::Quit => break,
                event::Action::CommitInput => app.commit_input()?,
                event::Action::ToggleTask => app.toggle_selected()?,
                event::Action::DeleteTask => app.delete_selected()?,
                event::Action::ClearCompleted => app.clear_completed()?,
            }
        }

        app.on_tick(Instant::now())?;
    }

    Ok(())
}
