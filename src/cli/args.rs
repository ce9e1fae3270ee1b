use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::features::focus::Mode;
use crate::features::tasks::TaskId;

#[derive(Parser)]
#[command(name = "pomodo")]
#[command(about = "A Pomodoro timer with a persisted to-do list")]
#[command(long_about = "pomodo - Pomodoro timer and to-do list for the terminal

Run 25-minute focus sessions with short and long breaks, and keep a
small to-do list alongside. When a focus session ends, the first open
task in the list is checked off automatically.

QUICK START:
  pomodo tui                 Interactive timer and task list
  pomodo run                 Headless 25-minute focus session
  pomodo task add \"Buy milk\" Add a task
  pomodo task list           Show tasks and what's left

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Falls back to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive timer and task list
    ///
    /// Full-screen terminal interface with the countdown, mode switcher,
    /// progress gauge and the task list. Press ? inside for key bindings.
    ///
    /// # Examples
    ///
    ///   pomodo tui                    Start in focus mode
    ///   pomodo tui --mode short-break Start on a short break
    #[command(alias = "ui")]
    Tui {
        /// Mode to start in
        #[arg(long, short = 'm', value_enum, default_value = "focus")]
        mode: Mode,
    },

    /// Run one session in the foreground
    ///
    /// Counts down a single session, printing a progress bar. When a focus
    /// session ends, the first open task is checked off.
    ///
    /// # Examples
    ///
    ///   pomodo run                    25-minute focus session
    ///   pomodo run -m long-break      15-minute break
    Run {
        /// Mode to run
        #[arg(long, short = 'm', value_enum, default_value = "focus")]
        mode: Mode,
    },

    /// Manage the task list
    ///
    /// # Examples
    ///
    ///   pomodo task add "Write report"
    ///   pomodo task list
    ///   pomodo task toggle 1718000000123
    ///   pomodo task clear
    #[command(alias = "t")]
    Task(TaskArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   pomodo completions zsh > ~/.zsh/completions/_pomodo
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for task management.
#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

/// Task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to the top of the list
    #[command(alias = "a")]
    Add {
        /// Task text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List tasks, newest first
    #[command(alias = "ls")]
    List,

    /// Toggle a task between open and completed
    Toggle {
        /// Task ID
        id: TaskId,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task ID
        id: TaskId,
    },

    /// Remove all completed tasks
    Clear,
}
