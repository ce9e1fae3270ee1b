//! Feature implementations for pomodo.
//!
//! - Focus timer (modes, countdown state machine, tick source)
//! - Task list (persisted to-do items)

pub mod focus;
pub mod tasks;
