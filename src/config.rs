use std::path::PathBuf;

use crate::infrastructure::memory_repo::MEMORY_LOCATION;

pub const STORE_PATH_VAR: &str = "TODO_STORE_PATH";
pub const LOG_FILE_VAR: &str = "TODO_LOG_FILE";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const APP_DIR: &str = "todo_store";
const STORE_FILE: &str = "TodoList.json";
const LOG_FILE: &str = "todo.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreLocation,
    /// `None` disables logging.
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl AppConfig {
    /// Reads the process environment after loading `.env`, if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok(), dirs::data_dir())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, data_dir: Option<PathBuf>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let store = match var(STORE_PATH_VAR) {
            Some(v) if v == MEMORY_LOCATION => StoreLocation::Memory,
            Some(v) => StoreLocation::File(PathBuf::from(v)),
            None => StoreLocation::File(default_store_path(data_dir)),
        };
        let log_file = match (var(LOG_FILE_VAR), &store) {
            (Some(v), _) => Some(PathBuf::from(v)),
            (None, StoreLocation::File(path)) => Some(path.with_file_name(LOG_FILE)),
            (None, StoreLocation::Memory) => None,
        };
        let log_filter = var(LOG_FILTER_VAR).unwrap_or_else(|| "info".into());

        Self { store, log_file, log_filter }
    }
}

fn default_store_path(data_dir: Option<PathBuf>) -> PathBuf {
    match data_dir {
        Some(dir) => dir.join(APP_DIR).join(STORE_FILE),
        None => PathBuf::from(STORE_FILE),
    }
}
