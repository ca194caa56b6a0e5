use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub(crate) fn generate() -> Self { Self(Uuid::new_v4()) }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { std::fmt::Display::fmt(&self.0, f) }
}

/// One task. Field names on disk follow the camelCase record layout of the
/// durable state file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl TodoItem {
    pub(crate) fn new(id: TodoId, title: String, notes: String, due_date: Option<NaiveDate>) -> Self {
        Self { id, title, is_completed: false, due_date, notes }
    }

    /// Whitespace-only notes count as no notes.
    pub fn has_notes(&self) -> bool { !self.notes.trim().is_empty() }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed && self.due_date.is_some_and(|due| due < today)
    }
}

/// Partial update. `None` keeps the current value; `due_date: Some(None)`
/// clears the due date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
    pub is_completed: Option<bool>,
}

impl UpdateTodo {
    pub fn title(mut self, title: impl Into<String>) -> Self { self.title = Some(title.into()); self }
    pub fn notes(mut self, notes: impl Into<String>) -> Self { self.notes = Some(notes.into()); self }
    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self { self.due_date = Some(due_date); self }
    pub fn completed(mut self, done: bool) -> Self { self.is_completed = Some(done); self }
}
