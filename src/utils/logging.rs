//! Tracing setup.
//!
//! The terminal UI owns stdout and stderr while a game is running, so log
//! records go to a file in the platform data directory.

use crate::core::constants::{DEFAULT_LOG_FILTER, LOG_FILE_NAME, LOG_FILTER_ENV};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter from `SNAKE_ARCADE_LOG`, falling back to the default.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install a global subscriber that appends to `<dir>/snake-arcade.log`.
///
/// Returns the log file path. Fails if the file cannot be opened; a second
/// call after a subscriber is already installed is a no-op.
pub fn init_file_logging(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    }

    Ok(path)
}

/// Log to stderr; used by the one-shot CLI commands where no UI is drawn.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
