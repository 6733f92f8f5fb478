//! SQLite storage implementation for project transactions.

mod model;
mod repository;

pub use model::TransactionDB;
pub use repository::TransactionRepository;
