//! Command implementations for pomodo.
//!
//! Each command returns the text to print; `main` does the printing.

mod completions;
mod run;
mod task;

pub use completions::generate_completions;
pub use run::run;
pub use task::task;

use log::debug;

use crate::config::{Config, Paths};
use crate::error::PomodoError;
use crate::storage::SqliteStore;

/// Open the task store named by `config`.
///
/// Falls back to `~/.pomodo/pomodo.db` when no database path is configured.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the
/// database cannot be opened.
pub fn open_store(config: &Config) -> Result<SqliteStore, PomodoError> {
    let paths = Paths::new().unwrap_or_default();
    paths.ensure_dirs()?;

    let path = config.database_path(&paths);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    debug!("using database {}", path.display());

    SqliteStore::open_at(&path)
}
