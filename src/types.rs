//! Common types used throughout flatload
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type (insertion ordered)
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Shape Mode
// ============================================================================

/// How the `content` payload of a source file is turned into rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeMode {
    /// Flatten every record of a `content` mapping, keyed by `id`
    #[default]
    FlattenAll,
    /// Store each `content` entry as an `id`/`description` pair
    IdDescriptionPairs,
    /// Flatten records of a `content` mapping or sequence, dropping all-null columns
    FlattenListOrDict,
}

impl std::fmt::Display for ShapeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeMode::FlattenAll => write!(f, "flatten_all"),
            ShapeMode::IdDescriptionPairs => write!(f, "id_description_pairs"),
            ShapeMode::FlattenListOrDict => write!(f, "flatten_list_or_dict"),
        }
    }
}

// ============================================================================
// Destination Kind
// ============================================================================

/// Supported destination databases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// PostgreSQL, reached through DuckDB's postgres extension
    #[default]
    Postgres,
    /// A native DuckDB database file
    Duckdb,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Postgres => write!(f, "postgres"),
            TargetKind::Duckdb => write!(f, "duckdb"),
        }
    }
}

/// Name of the JSON type of a value, for diagnostics
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
