//! Headless session command.
//!
//! Counts one session down in the foreground, redrawing a single progress
//! line once per tick.

use std::io::Write;
use std::time::Instant;

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::core::{Completion, Event, Observer, Pomodoro, Status};
use crate::error::PomodoError;
use crate::features::focus::{
    format_clock, format_duration, render_progress_bar, Mode, Timer, TICK_PERIOD,
};
use crate::output::{to_json, TerminalBell};
use crate::storage::KeyValueStore;

const BAR_WIDTH: usize = 30;

/// Run one session of `mode` to completion.
///
/// # Errors
///
/// Returns an error if the auto-completed task cannot be persisted.
pub fn run<S: KeyValueStore>(
    store: S,
    mode: Mode,
    bell: bool,
    format: OutputFormat,
) -> Result<String, PomodoError> {
    let mut app = Pomodoro::with_timer(store, Timer::new(mode));
    app.subscribe(Box::new(Progress::new(std::io::stdout(), mode, format)));
    if bell {
        app.subscribe(Box::new(TerminalBell::stdout()));
    }

    app.start();
    let completion = loop {
        let now = Instant::now();
        if let Some(completion) = app.poll(now)? {
            break completion;
        }
        let wait = app.timer().ticker().until_next(now).unwrap_or(TICK_PERIOD);
        std::thread::sleep(wait.min(TICK_PERIOD));
    };

    report(&app, completion, format)
}

fn report<S: KeyValueStore>(
    app: &Pomodoro<S>,
    completion: Completion,
    format: OutputFormat,
) -> Result<String, PomodoError> {
    match format {
        OutputFormat::Json => to_json(&completion),
        OutputFormat::Pretty => {
            let mut output = vec![format!("✅ {}", app.status()).green().bold().to_string()];

            if let Some(task) = completion.auto_completed.and_then(|id| app.tasks().get(id)) {
                output.push(format!("   Checked off: {}", task.text));
            }
            output.push(format!("   Tasks: {}", app.summary()));

            let next = if completion.mode.is_break() {
                "   Ready to focus again? 'pomodo run'"
            } else {
                "   Time for a break? 'pomodo run -m short-break'"
            };
            output.push(String::new());
            output.push(next.dimmed().to_string());

            Ok(output.join("\n"))
        }
    }
}

/// Prints session progress as events arrive.
///
/// Pretty output redraws one line in place; JSON output writes one event
/// per line.
struct Progress<W: Write> {
    out: W,
    total: u32,
    format: OutputFormat,
}

impl<W: Write> Progress<W> {
    const fn new(out: W, mode: Mode, format: OutputFormat) -> Self {
        Self {
            out,
            total: mode.seconds(),
            format,
        }
    }

    fn line(&self, time_left: u32) -> String {
        let fraction = if self.total == 0 {
            0.0
        } else {
            f64::from(time_left) / f64::from(self.total)
        };
        format!(
            "\r{} {}",
            format_clock(time_left),
            render_progress_bar(fraction, BAR_WIDTH)
        )
    }

    fn write_pretty(&mut self, event: &Event) -> std::io::Result<()> {
        match event {
            Event::Started { mode } => {
                let status = Status::running(*mode).to_string();
                let status = if mode.is_break() {
                    status.green()
                } else {
                    status.red()
                };
                writeln!(
                    self.out,
                    "🎯 {} ({}, {})",
                    status.bold(),
                    mode,
                    format_duration(mode.duration())
                )?;
                let line = self.line(self.total);
                write!(self.out, "{line}")?;
            }
            Event::Ticked { time_left } => {
                let line = self.line(*time_left);
                write!(self.out, "{line}")?;
            }
            Event::Completed { .. } => {
                let line = self.line(0);
                writeln!(self.out, "{line}")?;
            }
            _ => {}
        }
        self.out.flush()
    }

    fn write_json(&mut self, event: &Event) -> std::io::Result<()> {
        let line = serde_json::to_string(event)?;
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}

impl<W: Write> Observer for Progress<W> {
    fn on_event(&mut self, event: &Event) {
        let written = match self.format {
            OutputFormat::Pretty => self.write_pretty(event),
            OutputFormat::Json => self.write_json(event),
        };
        if let Err(e) = written {
            log::debug!("progress output failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn output(progress: &Progress<Vec<u8>>) -> String {
        String::from_utf8(progress.out.clone()).unwrap()
    }

    #[test]
    fn test_progress_pretty_line() {
        colored::control::set_override(false);
        let mut progress = Progress::new(Vec::new(), Mode::ShortBreak, OutputFormat::Pretty);

        progress.on_event(&Event::Started {
            mode: Mode::ShortBreak,
        });
        progress.on_event(&Event::Ticked { time_left: 150 });

        let text = output(&progress);
        assert!(text.starts_with("🎯 Break time! (Short Break, 5 minutes)\n"));
        assert!(text.ends_with("\r02:30 [███████████████░░░░░░░░░░░░░░░]"));
    }

    #[test]
    fn test_progress_json_lines() {
        let mut progress = Progress::new(Vec::new(), Mode::Focus, OutputFormat::Json);
        progress.on_event(&Event::Started { mode: Mode::Focus });
        progress.on_event(&Event::Ticked { time_left: 1499 });

        let text = output(&progress);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"event":"started","mode":"focus"}"#);
        assert_eq!(lines[1], r#"{"event":"ticked","time_left":1499}"#);
    }

    #[test]
    fn test_report_names_checked_off_task() {
        colored::control::set_override(false);
        let mut app = Pomodoro::new(MemoryStore::new());
        app.add_task("Write report").unwrap();
        app.start();
        let completion = app.complete().unwrap();

        let text = report(&app, completion, OutputFormat::Pretty).unwrap();
        assert!(text.starts_with("✅ Time for a break!"));
        assert!(text.contains("Checked off: Write report"));
        assert!(text.contains("All done"));
    }
}
