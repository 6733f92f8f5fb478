//! SQLite storage implementation for clients and suppliers.

mod model;
mod repository;

pub use model::PartyDB;
pub use repository::PartyRepository;
