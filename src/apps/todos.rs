//! The personal todo list.

pub mod forms;
pub mod models;
pub mod repository;
pub mod urls;
pub mod views;

pub use models::Todo;
pub use repository::{SqliteTodoRepository, TodoRepository};
