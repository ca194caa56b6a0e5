pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod tui;

pub use application::todo_store::{SubscriptionId, TodoStore};
pub use domain::{error::StoreError, repository::TodoRepository, todo::{TodoId, TodoItem, UpdateTodo}};
