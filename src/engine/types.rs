//! Engine types
//!
//! Configuration and per-file outcomes of a load run.

use crate::config::DEFAULT_SCHEMA;
use crate::types::ShapeMode;
use std::path::PathBuf;

/// Default folder JSON exports are read from
pub const DEFAULT_SOURCE_DIR: &str = "json_files/data1";

/// Configuration for a load run
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Folder holding the JSON files
    pub source_dir: PathBuf,
    /// How `content` is shaped into rows
    pub mode: ShapeMode,
    /// Destination schema tables are written to
    pub schema: String,
    /// Build tables without writing them
    pub dry_run: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            mode: ShapeMode::default(),
            schema: DEFAULT_SCHEMA.to_string(),
            dry_run: false,
        }
    }
}

impl LoadConfig {
    /// Create a load config for a source folder
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            ..Self::default()
        }
    }

    /// Set shape mode
    #[must_use]
    pub fn with_mode(mut self, mode: ShapeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set destination schema
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Enable or disable dry run
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Stage at which a file failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Reading or parsing the source file
    Read,
    /// Writing the table to the destination
    Write,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureStage::Read => write!(f, "read"),
            FailureStage::Write => write!(f, "write"),
        }
    }
}

/// What happened to one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Table written
    Loaded {
        /// Rows in the destination table
        rows: usize,
        /// Columns in the destination table
        columns: usize,
    },
    /// Nothing to load
    Skipped {
        /// Why the file was skipped
        reason: String,
    },
    /// `content` has a shape the mode cannot handle
    Unsupported {
        /// JSON type that was found
        found: &'static str,
    },
    /// Processing failed
    Failed {
        /// Where it failed
        stage: FailureStage,
        /// Error message
        error: String,
    },
}

/// Outcome of one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Source file name
    pub file: String,
    /// Destination table name
    pub table: String,
    /// What happened
    pub outcome: FileOutcome,
}

/// Summary of a load run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// One report per processed file, in processing order
    pub reports: Vec<FileReport>,
    /// Source folder did not exist
    pub folder_missing: bool,
    /// Source folder exists but could not be listed
    pub listing_error: Option<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl RunSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file outcome
    pub fn add(&mut self, report: FileReport) {
        self.reports.push(report);
    }

    /// Number of tables written
    pub fn loaded(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Loaded { .. }))
    }

    /// Number of files skipped (absent/empty or unsupported content)
    pub fn skipped(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                FileOutcome::Skipped { .. } | FileOutcome::Unsupported { .. }
            )
        })
    }

    /// Number of files that failed
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    /// Check if any file or table failed, or the folder could not be listed
    pub fn has_failures(&self) -> bool {
        self.failed() > 0 || self.listing_error.is_some()
    }

    /// Report for a table, if that table was processed
    pub fn report_for(&self, table: &str) -> Option<&FileReport> {
        self.reports.iter().find(|r| r.table == table)
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }
}
