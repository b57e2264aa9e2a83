//! Row building for each shape mode

use super::types::{ShapeOutcome, Table, DESCRIPTION_COLUMN, ID_COLUMN};
use crate::flatten::flatten_record;
use crate::types::{json_type_name, JsonObject, JsonValue, ShapeMode};

/// Builds tables from `content` values for a fixed shape mode
#[derive(Debug, Clone, Copy, Default)]
pub struct TableBuilder {
    mode: ShapeMode,
}

impl TableBuilder {
    /// Create a builder for the given mode
    pub fn new(mode: ShapeMode) -> Self {
        Self { mode }
    }

    /// Shape mode in use
    pub fn mode(&self) -> ShapeMode {
        self.mode
    }

    /// Shape a `content` value into a table
    pub fn build(&self, content: &JsonValue) -> ShapeOutcome {
        match (self.mode, content) {
            (ShapeMode::FlattenAll, JsonValue::Object(map)) => {
                ShapeOutcome::Table(Self::flatten_all(map))
            }
            (ShapeMode::IdDescriptionPairs, JsonValue::Object(map)) => {
                ShapeOutcome::Table(Self::id_description_pairs(map))
            }
            (ShapeMode::FlattenListOrDict, JsonValue::Object(map)) => {
                let records = map.iter().map(|(key, value)| (key.clone(), value));
                ShapeOutcome::Table(Self::flatten_list_or_dict(records))
            }
            (ShapeMode::FlattenListOrDict, JsonValue::Array(items)) => {
                let records = items
                    .iter()
                    .enumerate()
                    .map(|(idx, value)| (idx.to_string(), value));
                ShapeOutcome::Table(Self::flatten_list_or_dict(records))
            }
            (_, other) => ShapeOutcome::Unsupported {
                found: json_type_name(other),
            },
        }
    }

    /// One flattened row per entry, the entry key always becomes `id`
    fn flatten_all(map: &JsonObject) -> Table {
        let rows = map
            .iter()
            .map(|(key, value)| with_id(key.clone(), flatten_record(value), true))
            .collect();
        Table::from_rows(rows)
    }

    /// One `id`/`description` row per entry, values kept unflattened
    fn id_description_pairs(map: &JsonObject) -> Table {
        let rows = map
            .iter()
            .map(|(key, value)| {
                let mut row = JsonObject::with_capacity(2);
                row.insert(ID_COLUMN.to_string(), JsonValue::String(key.clone()));
                row.insert(DESCRIPTION_COLUMN.to_string(), value.clone());
                row
            })
            .collect();
        Table::from_rows(rows)
    }

    /// Flattened rows that keep their own `id` when they carry one
    fn flatten_list_or_dict<'a>(records: impl Iterator<Item = (String, &'a JsonValue)>) -> Table {
        let rows = records
            .map(|(fallback_id, value)| with_id(fallback_id, flatten_record(value), false))
            .collect();

        let mut table = Table::from_rows(rows);
        let dropped = table.drop_null_columns();
        if !dropped.is_empty() {
            tracing::debug!("Dropped all-null columns: {}", dropped.join(", "));
        }
        table
    }
}

/// Put an `id` cell first in a flattened row
///
/// With `overwrite` the given identifier replaces a flattened `id` value;
/// otherwise a non-null `id` value is kept and only moved to the front.
fn with_id(id: String, flat: JsonObject, overwrite: bool) -> JsonObject {
    let mut row = JsonObject::with_capacity(flat.len() + 1);
    let mut flat = flat;

    let existing = flat.shift_remove(ID_COLUMN);
    let id_value = match existing {
        Some(value) if !overwrite && !value.is_null() => value,
        _ => JsonValue::String(id),
    };
    row.insert(ID_COLUMN.to_string(), id_value);
    row.extend(flat);
    row
}

/// Shape a `content` value with the given mode
pub fn build_table(content: &JsonValue, mode: ShapeMode) -> ShapeOutcome {
    TableBuilder::new(mode).build(content)
}
