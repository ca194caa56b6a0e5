//! File-backed `tracing` setup for the terminal binary.
//!
//! Logging is best-effort: a log file that cannot be opened must never keep
//! the store or the UI from starting.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() { fs::create_dir_all(parent)?; }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber writing to `log_file`. Returns a
/// human-readable reason when logging stays off.
pub fn init_tracing(log_file: &Path, filter: &str) -> Result<(), String> {
    let file = open_log_file(log_file).map_err(|err| format!("logging disabled, cannot open {}: {err}", log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| format!("logging disabled: {err}"))
}
