use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::domain::error::StoreError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{TodoId, TodoItem, UpdateTodo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&[TodoItem])>;

/// Owns the ordered todo collection and keeps its repository in step with it.
///
/// Every mutating call rewrites the whole collection through the repository
/// before it returns, then notifies observers. Storage failures are logged and
/// never roll back the in-memory change.
pub struct TodoStore<R: TodoRepository> {
    repo: R,
    items: Vec<TodoItem>,
    synced: bool,
    load_failure: Option<StoreError>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<R: TodoRepository> TodoStore<R> {
    /// Builds the store and loads whatever the repository holds.
    pub fn open(repo: R) -> Self {
        let mut store = Self { repo, items: Vec::new(), synced: true, load_failure: None, observers: Vec::new(), next_subscription: 0 };
        store.load();
        store
    }

    fn load(&mut self) {
        match self.read_items() {
            Ok(Some(items)) => {
                info!(location = %self.repo.location(), count = items.len(), "loaded todos");
                self.items = items;
            }
            Ok(None) => debug!(location = %self.repo.location(), "no stored todos, starting empty"),
            Err(err) => {
                error!(location = %self.repo.location(), error = %err, "failed to load todos, starting empty");
                self.load_failure = Some(err);
            }
        }
    }

    fn read_items(&self) -> Result<Option<Vec<TodoItem>>, StoreError> {
        let Some(items) = self.repo.load()? else { return Ok(None) };
        let mut seen = HashSet::with_capacity(items.len());
        if let Some(dup) = items.iter().find(|t| !seen.insert(t.id)) {
            return Err(StoreError::DuplicateId(dup.id));
        }
        Ok(Some(items))
    }

    /// Writes the entire collection through the repository.
    pub fn persist(&self) -> Result<(), StoreError> { self.repo.save(&self.items) }

    pub fn items(&self) -> &[TodoItem] { &self.items }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> { self.items.iter().find(|t| t.id == id) }

    pub fn position_of(&self, id: TodoId) -> Option<usize> { self.items.iter().position(|t| t.id == id) }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn repository(&self) -> &R { &self.repo }

    /// False after a failed write until a later write succeeds.
    pub fn is_synced(&self) -> bool { self.synced }

    /// Why the initial load fell back to an empty collection, if it did.
    pub fn load_failure(&self) -> Option<&StoreError> { self.load_failure.as_ref() }

    /// Appends a new open item. Returns `None` without touching anything when
    /// the title is blank.
    pub fn add(&mut self, title: &str, notes: &str, due_date: Option<NaiveDate>) -> Option<TodoId> {
        let title = title.trim();
        if title.is_empty() {
            warn!("ignoring todo with blank title");
            return None;
        }
        let id = self.fresh_id();
        self.items.push(TodoItem::new(id, title.to_string(), notes.trim().to_string(), due_date));
        debug!(%id, "added todo");
        self.commit();
        Some(id)
    }

    /// Removes the items at `positions`, all checked against the current
    /// sequence before anything is removed. Returns the removed items in
    /// their former order.
    pub fn delete_at(&mut self, positions: impl IntoIterator<Item = usize>) -> Result<Vec<TodoItem>, StoreError> {
        let positions: BTreeSet<usize> = positions.into_iter().collect();
        let len = self.items.len();
        if let Some(&index) = positions.iter().find(|&&i| i >= len) {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        if positions.is_empty() {
            return Ok(Vec::new());
        }
        let mut removed = Vec::with_capacity(positions.len());
        for &index in positions.iter().rev() {
            removed.push(self.items.remove(index));
        }
        removed.reverse();
        debug!(count = removed.len(), "deleted todos");
        self.commit();
        Ok(removed)
    }

    pub fn delete_by_id(&mut self, id: TodoId) -> Option<TodoItem> {
        let index = self.position_of(id)?;
        // index comes from the current sequence
        self.delete_at([index]).ok()?.pop()
    }

    /// Returns whether an item was found and flipped.
    pub fn toggle_completion(&mut self, id: TodoId) -> bool {
        let Some(todo) = self.items.iter_mut().find(|t| t.id == id) else { return false };
        todo.is_completed = !todo.is_completed;
        debug!(%id, completed = todo.is_completed, "toggled todo");
        self.commit();
        true
    }

    /// Applies `input` to the item with `id`. A title that trims to empty
    /// rejects the whole update. Returns whether the item was updated.
    pub fn update(&mut self, id: TodoId, input: UpdateTodo) -> bool {
        let title = input.title.as_deref().map(str::trim);
        if title.is_some_and(str::is_empty) {
            warn!(%id, "ignoring update with blank title");
            return false;
        }
        let Some(todo) = self.items.iter_mut().find(|t| t.id == id) else { return false };
        if let Some(t) = title { todo.title = t.to_string(); }
        if let Some(n) = input.notes { todo.notes = n.trim().to_string(); }
        if let Some(d) = input.due_date { todo.due_date = d; }
        if let Some(c) = input.is_completed { todo.is_completed = c; }
        debug!(%id, "updated todo");
        self.commit();
        true
    }

    /// Registers a callback run with the current sequence after every change.
    pub fn subscribe(&mut self, observer: impl FnMut(&[TodoItem]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn fresh_id(&self) -> TodoId {
        loop {
            let id = TodoId::generate();
            if self.position_of(id).is_none() { return id; }
        }
    }

    fn commit(&mut self) {
        match self.persist() {
            Ok(()) => self.synced = true,
            Err(err) => {
                error!(location = %self.repo.location(), error = %err, "failed to save todos, keeping changes in memory");
                self.synced = false;
            }
        }
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.items);
        }
    }
}

impl<R: TodoRepository> std::fmt::Debug for TodoStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("location", &self.repo.location())
            .field("items", &self.items)
            .field("synced", &self.synced)
            .field("observers", &self.observers.len())
            .finish()
    }
}
