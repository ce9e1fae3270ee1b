//! Error types for pomodo.

use thiserror::Error;

/// Errors that can occur in pomodo.
#[derive(Debug, Error)]
pub enum PomodoError {
    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The `SQLite` store failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized data could not be parsed or produced.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The terminal could not be set up or drawn to.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl From<serde_json::Error> for PomodoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<rusqlite::Error> for PomodoError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}
