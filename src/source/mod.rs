//! Source file module
//!
//! Locates JSON export files and extracts their `content` payload.

mod discovery;
mod reader;

pub use discovery::{discover_files, table_name_for, SourceFile, SOURCE_EXTENSION};
pub use reader::{is_empty_content, parse_content, read_content, CONTENT_KEY};
