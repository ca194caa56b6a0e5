use super::error::StoreError;
use super::todo::TodoItem;

/// Durable storage behind a `TodoStore`. Every save replaces the whole
/// collection.
pub trait TodoRepository {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<TodoItem>>, StoreError>;
    /// Must be atomic: a later `load` sees either the old or the new sequence.
    fn save(&self, items: &[TodoItem]) -> Result<(), StoreError>;
    /// Human-readable location, used in logs and the UI footer.
    fn location(&self) -> String;
}

impl<R: TodoRepository + ?Sized> TodoRepository for Box<R> {
    fn load(&self) -> Result<Option<Vec<TodoItem>>, StoreError> { (**self).load() }
    fn save(&self, items: &[TodoItem]) -> Result<(), StoreError> { (**self).save(items) }
    fn location(&self) -> String { (**self).location() }
}
