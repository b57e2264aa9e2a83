//! JSON flattening module
//!
//! Turns arbitrarily nested JSON values into single-level rows whose keys
//! encode the original path.
//!
//! # Rules
//!
//! - `{"a": {"b": 1}}` becomes `{"a_b": 1}`
//! - `{"a": [10, 20]}` becomes `{"a_0": 10, "a_1": 20}`
//! - a bare scalar becomes `{"": scalar}`
//!
//! Generated names that end up empty or whitespace-only are renamed to
//! [`PLACEHOLDER_COLUMN`] before they are used as column names.

mod flattener;
mod naming;

pub use flattener::{flatten, SEPARATOR};
pub use naming::{is_blank_name, normalize_column_names, placeholder_name, PLACEHOLDER_COLUMN};

use crate::types::{JsonObject, JsonValue};

/// Flatten a record and make its column names usable
pub fn flatten_record(value: &JsonValue) -> JsonObject {
    normalize_column_names(flatten(value))
}

#[cfg(test)]
mod tests;
