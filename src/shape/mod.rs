//! Table shaping module
//!
//! Builds a [`Table`] out of the `content` payload of a source file.
//!
//! # Modes
//!
//! - `FlattenAll` - one flattened row per entry of a `content` mapping
//! - `IdDescriptionPairs` - one `id`/`description` row per mapping entry
//! - `FlattenListOrDict` - flattened rows from a mapping or a sequence,
//!   with all-null columns dropped
//!
//! A `content` value the mode cannot handle yields
//! [`ShapeOutcome::Unsupported`], never an error.

mod builder;
mod types;

pub use builder::{build_table, TableBuilder};
pub use types::{ShapeOutcome, Table, DESCRIPTION_COLUMN, ID_COLUMN};
