//! Utility functions for SQLite storage operations.

use std::str::FromStr;

use log::error;
use rust_decimal::Decimal;

/// Maximum number of parameters for SQLite IN (...) queries.
///
/// SQLite limits the number of bound parameters per statement (historically
/// 999). Chunks of 500 leave room for the query's other parameters.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Chunk a slice into smaller slices for batch SQLite queries.
///
/// ```ignore
/// let mut counts = HashMap::new();
/// for chunk in chunk_for_sqlite(&task_ids) {
///     counts.extend(count_in_chunk(conn, chunk)?);
/// }
/// ```
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Parses a money column stored as TEXT.
///
/// Values are written with `Decimal::to_string`, so a failure means the row
/// was edited by hand; it is logged and read as zero.
pub fn parse_decimal(value: &str, field_name: &str) -> Decimal {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .unwrap_or_else(|e| {
            error!(
                "Failed to parse {} '{}' as decimal ({}). Falling back to ZERO.",
                field_name, value, e
            );
            Decimal::ZERO
        })
}
