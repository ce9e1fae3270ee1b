//! To-do list with persistence.
//!
//! - Tasks are kept newest first
//! - Every mutation writes the full list to the key-value store
//! - Focus-session completion checks off the first open task

pub mod list;
pub mod task;

pub use list::{TaskList, STORAGE_KEY};
pub use task::{from_snapshot, to_snapshot, Summary, Task, TaskId};
