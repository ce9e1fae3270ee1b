//! `SQLite`-backed key-value store.
//!
//! The database is stored at `~/.pomodo/pomodo.db` and holds a single
//! `kv_store` table; each key maps to one opaque text value.

use std::path::Path;

use chrono::Utc;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::PomodoError;

use super::migrations;
use super::store::KeyValueStore;

/// Key-value store persisted in `SQLite`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, PomodoError> {
        let conn = Connection::open(path).map_err(|e| {
            PomodoError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        info!("opened store at {}", path.display());

        let store = Self { conn };
        store.migrate()?;

        Ok(store)
    }

    /// Open an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, PomodoError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            PomodoError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let store = Self { conn };
        store.migrate()?;

        Ok(store)
    }

    fn migrate(&self) -> Result<(), PomodoError> {
        migrations::run(&self.conn)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, PomodoError> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| PomodoError::Database(format!("Failed to read key {key}: {e}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PomodoError> {
        self.conn
            .execute(
                r"INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| PomodoError::Database(format!("Failed to write key {key}: {e}")))?;

        debug!("stored {} bytes under {key}", value.len());
        Ok(())
    }
}
