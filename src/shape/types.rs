//! Table types

use crate::types::{JsonObject, JsonValue};
use std::collections::HashSet;

/// Column holding the record identifier
pub const ID_COLUMN: &str = "id";

/// Column holding the raw value in id/description tables
pub const DESCRIPTION_COLUMN: &str = "description";

/// An in-memory table: ordered columns and ordered rows
///
/// Rows may omit columns; a missing cell reads as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<JsonObject>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows, taking the union of their columns
    ///
    /// Columns keep the order in which they first appear; `id` is moved to
    /// the front when present.
    pub fn from_rows(rows: Vec<JsonObject>) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();

        for row in &rows {
            for key in row.keys() {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
        }

        if let Some(pos) = columns.iter().position(|c| c == ID_COLUMN) {
            let id = columns.remove(pos);
            columns.insert(0, id);
        }

        Self { columns, rows }
    }

    /// Column names in table order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in source order
    pub fn rows(&self) -> &[JsonObject] {
        &self.rows
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Cell value; `None` when the row lacks the column
    pub fn value(&self, row: usize, column: &str) -> Option<&JsonValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// All cells of a column, `None` for missing cells
    pub fn column_values<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = Option<&'a JsonValue>> + 'a {
        self.rows.iter().map(move |r| r.get(column))
    }

    /// Check if every cell of a column is missing or null
    pub fn is_null_column(&self, column: &str) -> bool {
        self.column_values(column)
            .all(|v| v.map_or(true, JsonValue::is_null))
    }

    /// Remove columns that are null in every row, returning their names
    pub fn drop_null_columns(&mut self) -> Vec<String> {
        let dropped: Vec<String> = self
            .columns
            .iter()
            .filter(|c| self.is_null_column(c))
            .cloned()
            .collect();

        if dropped.is_empty() {
            return dropped;
        }

        self.columns.retain(|c| !dropped.contains(c));
        for row in &mut self.rows {
            for name in &dropped {
                row.shift_remove(name);
            }
        }

        dropped
    }

    /// Rows with every column present, missing cells filled with null
    pub fn to_records(&self) -> Vec<JsonValue> {
        self.rows
            .iter()
            .map(|row| {
                let record: JsonObject = self
                    .columns
                    .iter()
                    .map(|c| (c.clone(), row.get(c).cloned().unwrap_or(JsonValue::Null)))
                    .collect();
                JsonValue::Object(record)
            })
            .collect()
    }
}

/// Result of shaping a `content` value
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeOutcome {
    /// The content was shaped into a table
    Table(Table),
    /// The content has a JSON type the mode does not handle
    Unsupported {
        /// JSON type that was found
        found: &'static str,
    },
}

impl ShapeOutcome {
    /// Check if the content was unsupported
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// The shaped table; unsupported content gives an empty table
    pub fn into_table(self) -> Table {
        match self {
            Self::Table(table) => table,
            Self::Unsupported { .. } => Table::new(),
        }
    }
}
