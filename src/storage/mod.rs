//! Storage layer for pomodo.
//!
//! The core only sees [`KeyValueStore`]. Two implementations are provided:
//! - [`SqliteStore`] persists to `~/.pomodo/pomodo.db`
//! - [`MemoryStore`] keeps values in process, for tests and scratch sessions

mod database;
mod migrations;
mod store;

pub use database::SqliteStore;
#[cfg(test)]
pub use store::MockKeyValueStore;
pub use store::{KeyValueStore, MemoryStore};
