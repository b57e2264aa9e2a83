//! DuckDB-based table loader
//!
//! Stages each table as a Parquet file and copies it into the attached
//! destination with drop-and-create semantics.

use super::types::{Destination, TableWriter, WriteSummary, TARGET_ALIAS};
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use crate::output::{stage_table, StagingConfig};
use crate::shape::Table;
use crate::types::TargetKind;
use duckdb::Connection;
use std::path::{Path, PathBuf};

/// Database engine writing tables into a fixed schema of the destination
pub struct DatabaseEngine {
    /// DuckDB connection
    conn: Connection,
    /// Destination type
    kind: TargetKind,
    /// Schema tables are created in
    schema: String,
    /// Destination description (for logging)
    connection_info: String,
    /// Folder for Parquet staging files
    staging_dir: PathBuf,
    /// Staging file settings
    staging: StagingConfig,
}

impl DatabaseEngine {
    /// Open a destination and make sure the target schema exists
    pub fn open(destination: &Destination, schema: &str) -> Result<Self> {
        let engine = Self::connect(destination, schema)?;
        engine.ensure_schema()?;
        Ok(engine)
    }

    /// Attach a destination without changing it
    ///
    /// The target schema is not created; use [`DatabaseEngine::open`] before
    /// writing tables.
    pub fn connect(destination: &Destination, schema: &str) -> Result<Self> {
        let attach_target = match destination {
            Destination::Postgres(config) => config.dsn(),
            Destination::Duckdb(path) => path.display().to_string(),
        };

        // Create in-memory DuckDB connection
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::database(format!("Failed to create DuckDB connection: {e}")))?;

        let engine = Self {
            conn,
            kind: destination.kind(),
            schema: schema.to_string(),
            connection_info: destination.describe(),
            staging_dir: std::env::temp_dir(),
            staging: StagingConfig::default(),
        };

        engine.attach_database(&attach_target)?;

        tracing::debug!("Attached {} as {}", engine.connection_info, TARGET_ALIAS);
        Ok(engine)
    }

    /// Open a PostgreSQL destination
    pub fn postgres(config: &DatabaseConfig, schema: &str) -> Result<Self> {
        Self::open(&Destination::Postgres(config.clone()), schema)
    }

    /// Open a DuckDB file destination
    pub fn duckdb(path: impl AsRef<Path>, schema: &str) -> Result<Self> {
        Self::open(&Destination::Duckdb(path.as_ref().to_path_buf()), schema)
    }

    /// Use a different folder for staging files
    #[must_use]
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// Attach the destination database to DuckDB
    fn attach_database(&self, attach_target: &str) -> Result<()> {
        match self.kind {
            TargetKind::Postgres => {
                // Install and load postgres extension
                self.conn
                    .execute_batch("INSTALL postgres; LOAD postgres;")
                    .map_err(|e| {
                        Error::config(format!("Failed to load postgres extension: {e}"))
                    })?;

                let attach_sql = format!(
                    "ATTACH {} AS {TARGET_ALIAS} (TYPE POSTGRES);",
                    sql_literal(attach_target)
                );
                self.conn
                    .execute_batch(&attach_sql)
                    .map_err(|e| Error::database(format!("Failed to attach PostgreSQL: {e}")))?;
            }
            TargetKind::Duckdb => {
                let attach_sql =
                    format!("ATTACH {} AS {TARGET_ALIAS};", sql_literal(attach_target));
                self.conn
                    .execute_batch(&attach_sql)
                    .map_err(|e| Error::database(format!("Failed to attach DuckDB: {e}")))?;
            }
        }

        Ok(())
    }

    fn ensure_schema(&self) -> Result<()> {
        let sql = format!(
            "CREATE SCHEMA IF NOT EXISTS {TARGET_ALIAS}.{};",
            quote_ident(&self.schema)
        );
        self.conn.execute_batch(&sql).map_err(|e| {
            Error::database(format!("Failed to create schema '{}': {e}", self.schema))
        })
    }

    /// Test the destination connection
    pub fn check_connection(&self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.schemata WHERE catalog_name = ?",
                [TARGET_ALIAS],
                |row| row.get(0),
            )
            .map_err(|e| Error::database(format!("Connection check failed: {e}")))?;

        if count == 0 {
            return Err(Error::database(format!(
                "Connection check failed: no schemas visible in {}",
                self.connection_info
            )));
        }
        Ok(())
    }

    /// List tables in the target schema
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT table_name FROM information_schema.tables
                 WHERE table_catalog = ? AND table_schema = ?
                 ORDER BY table_name",
            )
            .map_err(|e| Error::database(format!("Failed to prepare query: {e}")))?;

        let tables: Vec<String> = stmt
            .query_map([TARGET_ALIAS, self.schema.as_str()], |row| row.get(0))
            .map_err(|e| Error::database(format!("Failed to query tables: {e}")))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(tables)
    }

    /// Replace a destination table with the contents of a Parquet file
    fn replace_from_parquet(&self, name: &str, parquet_path: &Path) -> Result<()> {
        let target = self.qualified_name(name);
        let source = sql_literal(&parquet_path.display().to_string());

        let sql = format!(
            "DROP TABLE IF EXISTS {target};
             CREATE TABLE {target} AS SELECT * FROM read_parquet({source});"
        );
        tracing::debug!("Executing: {}", sql);

        self.conn
            .execute_batch(&sql)
            .map_err(|e| Error::table_write(name, e.to_string()))
    }

    /// Read back the row count and column names of a destination table
    fn table_stats(&self, name: &str) -> Result<WriteSummary> {
        let count_sql = format!("SELECT COUNT(*) FROM {}", self.qualified_name(name));
        let rows: i64 = self
            .conn
            .query_row(&count_sql, [], |row| row.get(0))
            .map_err(|e| Error::table_write(name, format!("Failed to count rows: {e}")))?;

        let mut stmt = self
            .conn
            .prepare(
                "SELECT column_name FROM information_schema.columns
                 WHERE table_catalog = ? AND table_schema = ? AND table_name = ?
                 ORDER BY ordinal_position",
            )
            .map_err(|e| Error::table_write(name, format!("Failed to prepare query: {e}")))?;

        let columns: Vec<String> = stmt
            .query_map([TARGET_ALIAS, self.schema.as_str(), name], |row| row.get(0))
            .map_err(|e| Error::table_write(name, format!("Failed to read columns: {e}")))?
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(WriteSummary {
            table: name.to_string(),
            rows: rows as usize,
            columns,
        })
    }

    /// Fully qualified, quoted name of a destination table
    fn qualified_name(&self, name: &str) -> String {
        format!(
            "{TARGET_ALIAS}.{}.{}",
            quote_ident(&self.schema),
            quote_ident(name)
        )
    }

    fn staging_path(&self) -> PathBuf {
        self.staging_dir
            .join(format!("flatload_{}_{}.parquet", std::process::id(), unique_suffix()))
    }

    /// Destination type
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Schema tables are written to
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Destination description (password masked)
    pub fn connection_info(&self) -> &str {
        &self.connection_info
    }
}

impl TableWriter for DatabaseEngine {
    fn write_table(&mut self, name: &str, table: &Table) -> Result<WriteSummary> {
        if table.num_columns() == 0 {
            return Err(Error::table_write(name, "table has no columns"));
        }

        let staged = stage_table(table, self.staging_path(), &self.staging)
            .map_err(|e| Error::table_write(name, e.to_string()))?;
        self.replace_from_parquet(name, staged.path())?;
        drop(staged);

        self.table_stats(name)
    }
}

/// Generate a simple unique suffix (timestamp based)
fn unique_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{timestamp:x}")
}

/// Quote an SQL identifier
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote an SQL string literal
fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn table_from(values: Vec<Value>) -> Table {
        Table::from_rows(
            values
                .into_iter()
                .map(|v| v.as_object().unwrap().clone())
                .collect(),
        )
    }

    fn memory_engine() -> DatabaseEngine {
        DatabaseEngine::duckdb(":memory:", "data").unwrap()
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("users"), "\"users\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_sql_literal() {
        assert_eq!(sql_literal("/tmp/a.parquet"), "'/tmp/a.parquet'");
        assert_eq!(sql_literal("it's"), "'it''s'");
    }

    #[test]
    fn test_qualified_name() {
        let engine = memory_engine();
        assert_eq!(engine.qualified_name("t"), "dest.\"data\".\"t\"");
    }

    #[test]
    fn test_open_memory_destination() {
        let engine = memory_engine();
        assert_eq!(engine.kind(), TargetKind::Duckdb);
        assert_eq!(engine.schema(), "data");
        assert!(engine.check_connection().is_ok());
        assert!(engine.list_tables().unwrap().is_empty());
    }

    #[test]
    fn test_write_without_extension_downloads() {
        let mut engine = memory_engine();
        engine
            .conn
            .execute_batch(
                "SET autoinstall_known_extensions = false; SET autoload_known_extensions = false;",
            )
            .unwrap();

        let table = table_from(vec![json!({"id": "1", "v": 1})]);
        let summary = engine.write_table("offline", &table).unwrap();
        assert_eq!(summary.rows, 1);
    }

    #[test]
    fn test_connect_leaves_destination_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let destination = Destination::Duckdb(dir.path().join("check.duckdb"));

        let engine = DatabaseEngine::connect(&destination, "data").unwrap();
        assert!(engine.check_connection().is_ok());
        assert!(engine.list_tables().unwrap().is_empty());

        let schemas: i64 = engine
            .conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.schemata
                 WHERE catalog_name = ? AND schema_name = 'data'",
                [TARGET_ALIAS],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(schemas, 0);
    }

    #[test]
    fn test_write_table() {
        let mut engine = memory_engine();
        let table = table_from(vec![
            json!({"id": "1", "name": "Ana", "score": 9.5}),
            json!({"id": "2", "name": "Bia"}),
        ]);

        let summary = engine.write_table("people", &table).unwrap();
        assert_eq!(summary.table, "people");
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.columns, vec!["id", "name", "score"]);
        assert_eq!(engine.list_tables().unwrap(), vec!["people"]);

        let name: String = engine
            .conn
            .query_row(
                "SELECT name FROM dest.\"data\".people WHERE id = '2'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(name, "Bia");
    }

    #[test]
    fn test_write_case_colliding_columns() {
        let mut engine = memory_engine();
        let table = table_from(vec![json!({"id": "1", "Name": "x", "name": "y"})]);

        let summary = engine.write_table("t", &table).unwrap();
        assert_eq!(summary.columns, vec!["id", "Name", "name_1"]);
    }

    #[test]
    fn test_write_table_replaces_previous() {
        let mut engine = memory_engine();
        let first = table_from(vec![
            json!({"id": "1", "old": 1}),
            json!({"id": "2", "old": 2}),
        ]);
        let second = table_from(vec![json!({"id": "9", "new": true})]);

        engine.write_table("t", &first).unwrap();
        let summary = engine.write_table("t", &second).unwrap();

        assert_eq!(summary.rows, 1);
        assert_eq!(summary.columns, vec!["id", "new"]);
    }

    #[test]
    fn test_write_table_without_columns() {
        let mut engine = memory_engine();
        let err = engine.write_table("empty", &Table::new()).unwrap_err();
        assert!(matches!(err, Error::TableWrite { .. }));
    }

    #[test]
    fn test_staging_file_is_removed() {
        let staging = tempfile::tempdir().unwrap();
        let mut engine = memory_engine().with_staging_dir(staging.path());

        engine
            .write_table("t", &table_from(vec![json!({"id": "1"})]))
            .unwrap();

        assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 0);
    }
}
