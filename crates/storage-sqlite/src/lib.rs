//! SQLite storage implementation for budgetflow.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `budgetflow-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! Every write goes through the single writer actor, one job per immediate
//! transaction. A reconciliation plan is applied as one such job.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod budgets;
pub mod dones;
pub mod parties;
pub mod projects;
pub mod tasks;
pub mod transactions;
pub mod users;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from budgetflow-core for convenience
pub use budgetflow_core::errors::{DatabaseError, Error, Result};
