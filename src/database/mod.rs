//! Destination database support via DuckDB
//!
//! Tables are loaded through an in-memory DuckDB connection that attaches
//! the destination: PostgreSQL through DuckDB's postgres extension, or a
//! native DuckDB database file.

mod engine;
mod types;

pub use engine::DatabaseEngine;
pub use types::{Destination, DryRunWriter, TableWriter, WriteSummary, TARGET_ALIAS};
