use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{error::StoreError, repository::TodoRepository, todo::TodoItem};

use super::codec;

pub const MEMORY_LOCATION: &str = ":memory:";

#[derive(Debug, Default)]
struct Buffer {
    contents: Option<Vec<u8>>,
    fail_writes: bool,
    saves: usize,
}

/// Keeps the encoded collection in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<Mutex<Buffer>>,
}

impl InMemoryRepository {
    /// Starts from raw stored bytes, valid or not.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        let repo = Self::default();
        repo.buffer().contents = Some(bytes.into());
        repo
    }

    /// While set, every save fails with a write error and the buffer is left untouched.
    pub fn set_fail_writes(&self, fail: bool) { self.buffer().fail_writes = fail; }

    pub fn contents(&self) -> Option<Vec<u8>> { self.buffer().contents.clone() }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize { self.buffer().saves }

    fn buffer(&self) -> MutexGuard<'_, Buffer> { self.inner.lock().unwrap_or_else(PoisonError::into_inner) }
}

impl TodoRepository for InMemoryRepository {
    fn load(&self) -> Result<Option<Vec<TodoItem>>, StoreError> {
        match self.buffer().contents.as_deref() {
            Some(bytes) => codec::decode(bytes, MEMORY_LOCATION).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, items: &[TodoItem]) -> Result<(), StoreError> {
        let bytes = codec::encode(items)?;
        let mut buffer = self.buffer();
        if buffer.fail_writes {
            return Err(StoreError::Write {
                location: MEMORY_LOCATION.to_string(),
                source: io::Error::other("simulated write failure"),
            });
        }
        buffer.contents = Some(bytes);
        buffer.saves += 1;
        Ok(())
    }

    fn location(&self) -> String { MEMORY_LOCATION.to_string() }
}
