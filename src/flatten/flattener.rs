//! Recursive path flattener

use crate::types::{JsonObject, JsonValue};

/// Separator placed between path segments
pub const SEPARATOR: char = '_';

/// Flatten a nested value into a mapping from path to scalar
///
/// Mapping keys and sequence indices are joined with [`SEPARATOR`]. Empty
/// mappings and sequences produce no entries. When two paths collide the
/// later value wins and the column keeps its first position.
///
/// There is no depth guard; nesting is bounded by what `serde_json` accepts
/// when parsing.
pub fn flatten(value: &JsonValue) -> JsonObject {
    let mut out = JsonObject::new();
    let mut path = String::new();
    flatten_into(&mut out, &mut path, value);
    out
}

fn flatten_into(out: &mut JsonObject, path: &mut String, value: &JsonValue) {
    match value {
        JsonValue::Object(map) => {
            for (key, child) in map {
                let mark = path.len();
                path.push_str(key);
                path.push(SEPARATOR);
                flatten_into(out, path, child);
                path.truncate(mark);
            }
        }
        JsonValue::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                let mark = path.len();
                path.push_str(&idx.to_string());
                path.push(SEPARATOR);
                flatten_into(out, path, child);
                path.truncate(mark);
            }
        }
        scalar => {
            let key = path.strip_suffix(SEPARATOR).unwrap_or(path.as_str());
            out.insert(key.to_string(), scalar.clone());
        }
    }
}
