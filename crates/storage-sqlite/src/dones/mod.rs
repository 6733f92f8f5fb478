//! SQLite storage implementation for realizations.

mod model;
mod repository;

pub use model::{DoneActivityDB, DoneDB, DoneExpenseDB};
pub use repository::DoneRepository;
