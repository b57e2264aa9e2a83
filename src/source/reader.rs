//! Source document reader

use crate::error::{Error, Result};
use crate::types::{json_type_name, JsonValue};
use std::path::Path;

/// Top-level key holding the payload of a source document
pub const CONTENT_KEY: &str = "content";

/// Read a source file and return its `content` value
///
/// Returns `None` when the document has no `content` key. A document whose
/// top level is not an object cannot carry one and is an error.
pub fn read_content(path: impl AsRef<Path>) -> Result<Option<JsonValue>> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path)
        .map_err(|e| Error::source_file(path.display().to_string(), e.to_string()))?;

    parse_content(&body)
        .map_err(|e| Error::source_file(path.display().to_string(), e.to_string()))
}

/// Parse a source document and take its `content` value
pub fn parse_content(body: &str) -> Result<Option<JsonValue>> {
    let document: JsonValue = serde_json::from_str(body)?;

    match document {
        JsonValue::Object(mut map) => Ok(map.shift_remove(CONTENT_KEY)),
        other => Err(Error::Other(format!(
            "expected a top-level object, found {}",
            json_type_name(&other)
        ))),
    }
}

/// Check if a `content` value carries nothing to load
///
/// Null, empty objects, empty arrays and empty strings count as empty.
pub fn is_empty_content(content: &JsonValue) -> bool {
    match content {
        JsonValue::Null => true,
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Bool(_) | JsonValue::Number(_) => false,
    }
}
