//! pomodo - a Pomodoro timer with a persisted to-do list
//!
//! This crate provides the timer state machine, the task list manager, the
//! controller that couples them, and a terminal front end built on top.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use core::{Event, Observer, Pomodoro, Status};
pub use error::PomodoError;
pub use features::focus::{Mode, Timer};
pub use features::tasks::{Summary, Task, TaskList};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
