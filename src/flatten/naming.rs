//! Column name normalization

use crate::types::JsonObject;
use std::collections::HashSet;

/// Name given to columns whose generated name is empty or whitespace-only
pub const PLACEHOLDER_COLUMN: &str = "Unnamed_Column";

/// Whether a generated column name is unusable
pub fn is_blank_name(name: &str) -> bool {
    name.trim().is_empty()
}

/// Placeholder name for the `n`th blank column of a record
///
/// The first is `Unnamed_Column`, then `Unnamed_Column_1`, `Unnamed_Column_2`...
pub fn placeholder_name(n: usize) -> String {
    if n == 0 {
        PLACEHOLDER_COLUMN.to_string()
    } else {
        format!("{PLACEHOLDER_COLUMN}_{n}")
    }
}

/// Replace blank column names with distinct placeholders
///
/// Column order is preserved. Placeholders skip any name the record
/// already uses, so no value is overwritten.
pub fn normalize_column_names(record: JsonObject) -> JsonObject {
    if !record.keys().any(|k| is_blank_name(k)) {
        return record;
    }

    let taken: HashSet<String> = record
        .keys()
        .filter(|k| !is_blank_name(k))
        .cloned()
        .collect();

    let mut out = JsonObject::with_capacity(record.len());
    let mut next = 0usize;

    for (key, value) in record {
        if !is_blank_name(&key) {
            out.insert(key, value);
            continue;
        }

        let name = loop {
            let candidate = placeholder_name(next);
            next += 1;
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        tracing::debug!("Renamed blank column {:?} to {}", key, name);
        out.insert(name, value);
    }

    out
}
