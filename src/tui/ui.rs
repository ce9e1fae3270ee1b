//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use crate::features::focus::Mode;
use crate::storage::KeyValueStore;
use crate::tui::app::{App, InputMode};
use crate::tui::event::HELP;

/// Accent color for the current mode.
const fn mode_color(mode: Mode) -> Color {
    if mode.is_break() {
        Color::Green
    } else {
        Color::Red
    }
}

/// Render the application UI.
pub fn render<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>) {
    // Create layout: mode tabs, clock, gauge, input, list, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Mode tabs
            Constraint::Length(4), // Clock and status
            Constraint::Length(3), // Progress gauge
            Constraint::Length(3), // New-task input
            Constraint::Min(0),    // Task list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    render_clock(frame, app, chunks[1]);
    render_gauge(frame, app, chunks[2]);
    render_input(frame, app, chunks[3]);
    render_list(frame, app, chunks[4]);
    render_status_bar(frame, app, chunks[5]);
}

/// Render the mode switcher.
fn render_tabs<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let current = app.controller.timer().mode();
    let titles = Mode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| format!("{} {}", i + 1, mode.display_name()));
    let selected = Mode::ALL.iter().position(|m| *m == current).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(mode_color(current))
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .title(" pomodo ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(tabs, area);
}

/// Render the countdown and the status line.
fn render_clock<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let color = mode_color(app.controller.timer().mode());
    let text = vec![
        Line::from(Span::styled(
            app.controller.clock(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.controller.status().to_string(),
            Style::default().fg(color),
        )),
    ];

    let clock = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT));

    frame.render_widget(clock, area);
}

/// Render the progress gauge.
fn render_gauge<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let timer = app.controller.timer();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(mode_color(timer.mode())))
        .ratio(app.controller.progress().clamp(0.0, 1.0))
        .label(format!("{}s / {}s", timer.time_left(), timer.total()));

    frame.render_widget(gauge, area);
}

/// Render the new-task input.
fn render_input<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let (text, style) = match app.input_mode {
        InputMode::Editing => (format!("{}_", app.input), Style::default().fg(Color::Yellow)),
        InputMode::Normal => (
            "Press a to add a task".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .title(" New task ")
            .borders(Borders::ALL),
    );

    frame.render_widget(input, area);
}

/// Render the task list.
fn render_list<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let block = Block::default()
        .title(format!(" Tasks ({}) ", app.controller.summary()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let tasks = app.controller.tasks().tasks();
    if tasks.is_empty() {
        let empty = Paragraph::new("No tasks yet. Add one above!")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem<'_>> = tasks
        .iter()
        .map(|task| {
            let (icon, style) = if task.completed {
                (
                    "[x]",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ]", Style::default())
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{icon} "),
                    Style::default().fg(if task.completed {
                        Color::Green
                    } else {
                        Color::White
                    }),
                ),
                Span::styled(task.text.as_str(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the status bar.
fn render_status_bar<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let status_text = if app.show_help {
        HELP
    } else {
        app.message.as_deref().unwrap_or("?:help | q:quit")
    };

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
