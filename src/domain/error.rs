use thiserror::Error;

use super::todo::TodoId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("position {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to read {location}: {source}")]
    Read { location: String, #[source] source: std::io::Error },

    #[error("failed to decode {location}: {source}")]
    Decode { location: String, #[source] source: serde_json::Error },

    #[error("duplicate todo id {0} in stored data")]
    DuplicateId(TodoId),

    #[error("failed to encode todos: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write {location}: {source}")]
    Write { location: String, #[source] source: std::io::Error },
}

impl StoreError {
    /// Failures that leave durable state behind the in-memory collection.
    pub fn is_write_failure(&self) -> bool { matches!(self, Self::Encode(_) | Self::Write { .. }) }

    /// Failures that cause `load` to start from an empty collection.
    pub fn is_load_failure(&self) -> bool { matches!(self, Self::Read { .. } | Self::Decode { .. } | Self::DuplicateId(_)) }
}
