//! Budgetflow Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for budgetflow: task
//! reconciliation between budgets and live work, realization recording and
//! project reporting. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod auth;
pub mod budgets;
pub mod constants;
pub mod dones;
pub mod errors;
pub mod parties;
pub mod projects;
pub mod reporting;
pub mod tasks;
pub mod transactions;
pub mod users;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
