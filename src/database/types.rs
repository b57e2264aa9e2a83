//! Database types

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::shape::Table;
use crate::types::TargetKind;
use std::path::PathBuf;

/// Catalog alias the destination is attached under
pub const TARGET_ALIAS: &str = "dest";

/// Where loaded tables go
#[derive(Debug, Clone)]
pub enum Destination {
    /// PostgreSQL server
    Postgres(DatabaseConfig),
    /// DuckDB database file (`:memory:` for a throwaway database)
    Duckdb(PathBuf),
}

impl Destination {
    /// Kind of database behind this destination
    pub fn kind(&self) -> TargetKind {
        match self {
            Destination::Postgres(_) => TargetKind::Postgres,
            Destination::Duckdb(_) => TargetKind::Duckdb,
        }
    }

    /// Human-readable description, password masked
    pub fn describe(&self) -> String {
        match self {
            Destination::Postgres(config) => config.connection_info(),
            Destination::Duckdb(path) => format!("duckdb:{}", path.display()),
        }
    }
}

/// Result of writing one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Table name
    pub table: String,
    /// Rows now stored in the destination table
    pub rows: usize,
    /// Destination column names, in order
    pub columns: Vec<String>,
}

/// Persists tables, replacing any previous table of the same name
pub trait TableWriter {
    /// Replace the named table with the given contents
    fn write_table(&mut self, name: &str, table: &Table) -> Result<WriteSummary>;
}

/// Writer that keeps nothing
///
/// Used for dry runs: reports what would have been written.
#[derive(Debug, Clone, Default)]
pub struct DryRunWriter {
    written: Vec<WriteSummary>,
}

impl DryRunWriter {
    /// Create a dry-run writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables seen so far
    pub fn written(&self) -> &[WriteSummary] {
        &self.written
    }
}

impl TableWriter for DryRunWriter {
    fn write_table(&mut self, name: &str, table: &Table) -> Result<WriteSummary> {
        let summary = WriteSummary {
            table: name.to_string(),
            rows: table.num_rows(),
            columns: table.columns().to_vec(),
        };
        self.written.push(summary.clone());
        Ok(summary)
    }
}
