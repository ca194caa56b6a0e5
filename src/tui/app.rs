use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::warn;

use crate::application::todo_store::TodoStore;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{TodoId, TodoItem, UpdateTodo};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode { View, Create, Edit }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter { All, Open, Completed }

impl Filter {
    fn next(self) -> Self {
        match self { Filter::All => Filter::Open, Filter::Open => Filter::Completed, Filter::Completed => Filter::All }
    }

    fn matches(self, todo: &TodoItem) -> bool {
        match self { Filter::All => true, Filter::Open => !todo.is_completed, Filter::Completed => todo.is_completed }
    }

    pub fn label(self) -> &'static str {
        match self { Filter::All => "All", Filter::Open => "Open", Filter::Completed => "Completed" }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field { Title, Notes, Due, Completed }

impl Field {
    /// `Completed` is only part of the edit form.
    fn next(self, editing: bool) -> Self {
        match self {
            Field::Title => Field::Notes,
            Field::Notes => Field::Due,
            Field::Due if editing => Field::Completed,
            Field::Due | Field::Completed => Field::Title,
        }
    }

    fn prev(self, editing: bool) -> Self {
        match self {
            Field::Title if editing => Field::Completed,
            Field::Title => Field::Due,
            Field::Notes => Field::Title,
            Field::Due => Field::Notes,
            Field::Completed => Field::Due,
        }
    }
}

/// Form contents while creating or editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub notes: String,
    pub due: String,
    pub completed: bool,
}

impl Draft {
    fn from_item(todo: &TodoItem) -> Self {
        Self {
            title: todo.title.clone(),
            notes: todo.notes.clone(),
            due: todo.due_date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
            completed: todo.is_completed,
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Title => Some(&mut self.title),
            Field::Notes => Some(&mut self.notes),
            Field::Due => Some(&mut self.due),
            Field::Completed => None,
        }
    }

    fn parse_due(&self) -> Result<Option<NaiveDate>, String> {
        let raw = self.due.trim();
        if raw.is_empty() { return Ok(None); }
        NaiveDate::parse_from_str(raw, DATE_FORMAT).map(Some).map_err(|_| format!("due date '{raw}' is not YYYY-MM-DD"))
    }
}

pub struct App<R: TodoRepository> {
    pub store: TodoStore<R>,
    pub mode: Mode,
    pub filter: Filter,
    pub field: Field,
    pub draft: Draft,
    /// Index into `visible()`, not into the store.
    pub selected: usize,
    pub editing: Option<TodoId>,
    pub status: Option<String>,
    pub today: NaiveDate,
    pub should_quit: bool,
}

impl<R: TodoRepository> App<R> {
    pub fn new(store: TodoStore<R>, today: NaiveDate) -> Self {
        let status = store.load_failure().map(|err| format!("could not load saved todos: {err}"));
        Self {
            store,
            mode: Mode::View,
            filter: Filter::All,
            field: Field::Title,
            draft: Draft::default(),
            selected: 0,
            editing: None,
            status,
            today,
            should_quit: false,
        }
    }

    /// Shows `notice` unless a load failure is already on display.
    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        if self.status.is_none() { self.status = notice; }
        self
    }

    /// Store positions of the rows shown under the current filter.
    pub fn visible(&self) -> Vec<usize> {
        self.store.items().iter().enumerate().filter(|(_, t)| self.filter.matches(t)).map(|(i, _)| i).collect()
    }

    pub fn selected_position(&self) -> Option<usize> { self.visible().get(self.selected).copied() }

    pub fn selected_item(&self) -> Option<&TodoItem> { self.selected_position().and_then(|p| self.store.items().get(p)) }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if len == 0 { self.selected = 0; } else if self.selected >= len { self.selected = len - 1; }
    }

    fn note_write_state(&mut self) {
        if !self.store.is_synced() {
            self.status = Some(format!("could not save to {}; changes kept in memory", self.store.repository().location()));
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only act on key presses; ignore repeats and releases
        if key.kind != KeyEventKind::Press { return; }
        match self.mode {
            Mode::View => self.handle_view_key(key.code),
            Mode::Create | Mode::Edit => self.handle_form_key(key.code),
        }
        self.clamp_selection();
    }

    fn handle_view_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => { self.selected = self.selected.saturating_sub(1); }
            KeyCode::Down | KeyCode::Char('j') => { self.selected += 1; }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.selected_item().map(|t| t.id) {
                    self.status = None;
                    self.store.toggle_completion(id);
                    self.note_write_state();
                }
            }
            KeyCode::Char('n') => {
                self.status = None;
                self.draft = Draft::default();
                self.field = Field::Title;
                self.editing = None;
                self.mode = Mode::Create;
            }
            KeyCode::Char('e') => {
                if let Some(todo) = self.selected_item().cloned() {
                    self.draft = Draft::from_item(&todo);
                    self.editing = Some(todo.id);
                    self.field = Field::Title;
                    self.status = None;
                    self.mode = Mode::Edit;
                }
            }
            KeyCode::Char('d') => {
                if let Some(pos) = self.selected_position() {
                    self.status = None;
                    match self.store.delete_at([pos]) {
                        Ok(_) => self.note_write_state(),
                        Err(err) => {
                            warn!(error = %err, "delete failed");
                            self.status = Some(err.to_string());
                        }
                    }
                }
            }
            KeyCode::Char('f') => { self.filter = self.filter.next(); }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let editing = self.mode == Mode::Edit;
        match code {
            KeyCode::Esc => self.close_form(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab => { self.field = self.field.next(editing); }
            KeyCode::BackTab => { self.field = self.field.prev(editing); }
            KeyCode::Char(' ') if self.field == Field::Completed => { self.draft.completed = !self.draft.completed; }
            KeyCode::Backspace => { if let Some(text) = self.draft.text_mut(self.field) { text.pop(); } }
            KeyCode::Char(c) => { if let Some(text) = self.draft.text_mut(self.field) { text.push(c); } }
            _ => {}
        }
    }

    fn close_form(&mut self) {
        self.mode = Mode::View;
        self.draft = Draft::default();
        self.editing = None;
    }

    fn submit_form(&mut self) {
        let due = match self.draft.parse_due() {
            Ok(due) => due,
            Err(msg) => { self.status = Some(msg); return; }
        };
        self.status = None;
        match (self.mode, self.editing) {
            (Mode::Create, _) => {
                let Some(id) = self.store.add(&self.draft.title, &self.draft.notes, due) else {
                    self.status = Some("title must not be empty".into());
                    return;
                };
                self.close_form();
                if let Some(row) = self.store.position_of(id).and_then(|p| self.visible().iter().position(|&v| v == p)) {
                    self.selected = row;
                }
            }
            (Mode::Edit, Some(id)) => {
                let input = UpdateTodo::default().title(self.draft.title.as_str()).notes(self.draft.notes.as_str()).due_date(due).completed(self.draft.completed);
                if !self.store.update(id, input) && self.store.get(id).is_some() {
                    self.status = Some("title must not be empty".into());
                    return;
                }
                self.close_form();
            }
            _ => self.close_form(),
        }
        self.note_write_state();
    }
}
