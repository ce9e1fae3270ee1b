//! Core controller and its notifications.
//!
//! This module provides the controller that owns the timer and the task list,
//! along with the events it emits for presentation layers.

mod controller;
mod events;

pub use controller::{Completion, Pomodoro};
#[cfg(test)]
pub use events::MockObserver;
pub use events::{Event, Observer, Status};
