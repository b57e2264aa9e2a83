// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]

//! # flatload
//!
//! Loads folders of JSON exports into relational tables.
//!
//! Every `.json` file in the source folder carries its payload under a
//! top-level `content` key. The payload is shaped into rows, nested
//! structures are flattened into `_`-joined column names, and the result
//! replaces a table named after the file in the `data` schema.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flatload::database::{DatabaseEngine, Destination};
//! use flatload::engine::{LoadConfig, LoadEngine};
//! use flatload::{DatabaseConfig, ShapeMode};
//!
//! fn main() -> flatload::Result<()> {
//!     let config = DatabaseConfig::from_env()?;
//!     let mut writer = DatabaseEngine::open(&Destination::Postgres(config), "data")?;
//!
//!     let engine = LoadEngine::new(
//!         LoadConfig::new("json_files/data1").with_mode(ShapeMode::FlattenListOrDict),
//!     );
//!     let summary = engine.run(&mut writer);
//!     println!("{} loaded, {} failed", summary.loaded(), summary.failed());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────────────────┐
//! │  source  │ → │  shape   │ → │  output  │ → │       database       │
//! │ discover │   │ flatten  │   │  Arrow   │   │ DuckDB → Postgres    │
//! │ content  │   │ 3 modes  │   │ Parquet  │   │ drop + create table  │
//! └──────────┘   └──────────┘   └──────────┘   └──────────────────────┘
//!                        engine: one file at a time
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Database connection settings
pub mod config;

/// Source folder discovery and document reading
pub mod source;

/// Recursive flattening of nested JSON
pub mod flatten;

/// Row building per shape mode
pub mod shape;

/// Arrow/Parquet output
pub mod output;

/// Destination database via DuckDB
pub mod database;

/// Main load loop
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::DatabaseConfig;
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
