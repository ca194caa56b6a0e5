pub mod todo_store;
mod todo_store_tests;
