//! SQLite storage implementation for tasks and their expense/activity rows.

mod model;
mod repository;

pub use model::{NewTaskDB, TaskActivityDB, TaskDB, TaskExpenseDB};
pub use repository::TaskRepository;
