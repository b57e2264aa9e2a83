//! Arrow schema inference and table to Arrow conversion
//!
//! Every table column maps to one flat Arrow type. Nested values that
//! survive shaping (id/description tables) are stored as JSON text.

use crate::error::{Error, Result};
use crate::shape::Table;
use crate::types::JsonValue;
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::collections::HashSet;
use std::sync::Arc;

/// Infer the Arrow type of a table column
///
/// Nulls are ignored; a column with no non-null value is Utf8.
pub fn infer_column_type(table: &Table, column: &str) -> DataType {
    table
        .column_values(column)
        .flatten()
        .filter(|v| !v.is_null())
        .map(infer_type)
        .reduce(|acc, t| merge_types(&acc, &t))
        .unwrap_or(DataType::Utf8)
}

/// Arrow schema of a table, in table column order
///
/// All fields are nullable. Field names are unique ignoring case, since the
/// database folds identifiers: a later `Name` next to `name` becomes `Name_1`.
pub fn table_schema(table: &Table) -> Schema {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .zip(field_names(table.columns()))
        .map(|(column, name)| Field::new(name, infer_column_type(table, column), true))
        .collect();

    Schema::new(fields)
}

/// Column names made unique case-insensitively, in order
fn field_names(columns: &[String]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(columns.len());
    columns
        .iter()
        .map(|column| {
            let mut name = column.clone();
            let mut n = 0usize;
            while !taken.insert(name.to_lowercase()) {
                n += 1;
                name = format!("{column}_{n}");
            }
            name
        })
        .collect()
}

/// Convert a table to an Arrow RecordBatch
pub fn table_to_arrow(table: &Table) -> Result<RecordBatch> {
    let schema = Arc::new(table_schema(table));

    if table.num_columns() == 0 {
        return Err(Error::output("Cannot convert a table without columns"));
    }

    let columns: Vec<ArrayRef> = table
        .columns()
        .iter()
        .zip(schema.fields().iter())
        .map(|(column, field)| {
            let values: Vec<Option<&JsonValue>> = table.column_values(column).collect();
            build_array(&values, field.data_type())
        })
        .collect();

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Infer Arrow DataType from a non-null JSON value
fn infer_type(value: &JsonValue) -> DataType {
    match value {
        JsonValue::Bool(_) => DataType::Boolean,
        JsonValue::Number(n) => {
            if n.is_i64() {
                DataType::Int64
            } else {
                DataType::Float64
            }
        }
        _ => DataType::Utf8,
    }
}

/// Merge two data types into a compatible type
fn merge_types(type1: &DataType, type2: &DataType) -> DataType {
    match (type1, type2) {
        // Same types
        (a, b) if a == b => a.clone(),

        // Numbers can merge (prefer Float64 for mixed)
        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }

        // Different types -> fall back to String (most flexible)
        _ => DataType::Utf8,
    }
}

/// Build an Arrow array from JSON cells
fn build_array(values: &[Option<&JsonValue>], data_type: &DataType) -> ArrayRef {
    match data_type {
        DataType::Boolean => {
            let arr: BooleanArray = values
                .iter()
                .map(|v| v.and_then(JsonValue::as_bool))
                .collect();
            Arc::new(arr)
        }

        DataType::Int64 => {
            let arr: Int64Array = values.iter().map(|v| v.and_then(JsonValue::as_i64)).collect();
            Arc::new(arr)
        }

        DataType::Float64 => {
            let arr: Float64Array = values.iter().map(|v| v.and_then(JsonValue::as_f64)).collect();
            Arc::new(arr)
        }

        _ => {
            let arr: StringArray = values
                .iter()
                .map(|v| {
                    v.and_then(|v| match v {
                        JsonValue::Null => None,
                        JsonValue::String(s) => Some(s.clone()),
                        other => Some(other.to_string()),
                    })
                })
                .collect();
            Arc::new(arr)
        }
    }
}
