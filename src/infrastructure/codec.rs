use crate::domain::{error::StoreError, todo::TodoItem};

pub fn encode(items: &[TodoItem]) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(items).map_err(StoreError::Encode)
}

pub fn decode(bytes: &[u8], location: &str) -> Result<Vec<TodoItem>, StoreError> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Decode { location: location.to_string(), source })
}
