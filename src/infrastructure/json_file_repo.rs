use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::domain::{error::StoreError, repository::TodoRepository, todo::TodoItem};

use super::codec;

/// Stores the collection as one JSON file. Saves go through a sibling
/// temporary file that is renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn path(&self) -> &Path { &self.path }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomic(&self, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() { fs::create_dir_all(parent)?; }
        }
        let tmp = self.temp_path();
        let result = write_and_swap(&tmp, &self.path, bytes);
        if result.is_err() {
            // never leave a partial temp file behind
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

fn write_and_swap(tmp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, target)
}

impl TodoRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<Vec<TodoItem>>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Read { location: self.location(), source }),
        };
        codec::decode(&bytes, &self.location()).map(Some)
    }

    fn save(&self, items: &[TodoItem]) -> Result<(), StoreError> {
        let bytes = codec::encode(items)?;
        self.write_atomic(&bytes).map_err(|source| StoreError::Write { location: self.location(), source })
    }

    fn location(&self) -> String { self.path.display().to_string() }
}
