//! Load engine module
//!
//! Main file loop: discover, read, shape, write.
//!
//! # Overview
//!
//! The engine module provides:
//! - `LoadEngine` - Processes every JSON file of a folder, one at a time
//! - `LoadConfig` - Source folder and shape mode
//! - `RunSummary` - Per-file outcomes of a run
//!
//! A failure while handling one file is logged and recorded; the run
//! always continues with the next file.

mod types;

pub use types::{
    FailureStage, FileOutcome, FileReport, LoadConfig, RunSummary, DEFAULT_SOURCE_DIR,
};

use crate::database::TableWriter;
use crate::error::Error;
use crate::shape::{ShapeOutcome, TableBuilder};
use crate::source::{discover_files, is_empty_content, read_content, SourceFile, CONTENT_KEY};
use std::time::Instant;

/// Load engine for turning a folder of JSON exports into tables
pub struct LoadEngine {
    /// Load configuration
    config: LoadConfig,
    /// Row builder for the configured mode
    builder: TableBuilder,
}

impl LoadEngine {
    /// Create a new load engine
    pub fn new(config: LoadConfig) -> Self {
        let builder = TableBuilder::new(config.mode);
        Self { config, builder }
    }

    /// Get the configuration
    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Process every JSON file of the source folder
    ///
    /// A missing or empty folder is reported and ends the run cleanly.
    pub fn run<W: TableWriter + ?Sized>(&self, writer: &mut W) -> RunSummary {
        let start = Instant::now();
        let mut summary = RunSummary::new();
        let folder = self.config.source_dir.display().to_string();

        let files = match discover_files(&self.config.source_dir) {
            Ok(files) => files,
            Err(e) => {
                record_listing_error(&mut summary, &folder, e);
                return summary;
            }
        };

        if files.is_empty() {
            tracing::warn!("No JSON files found in '{}'", folder);
            return summary;
        }

        tracing::info!(
            "Processing {} file(s) from '{}' with mode {}",
            files.len(),
            folder,
            self.config.mode
        );

        for file in &files {
            let outcome = self.process_file(file, writer);
            summary.add(FileReport {
                file: file.file_name(),
                table: file.table_name.clone(),
                outcome,
            });
        }

        #[allow(clippy::cast_possible_truncation)]
        summary.set_duration(start.elapsed().as_millis() as u64);

        tracing::info!(
            "Finished in {}ms: {} loaded, {} skipped, {} failed",
            summary.duration_ms,
            summary.loaded(),
            summary.skipped(),
            summary.failed()
        );

        summary
    }

    /// Process one file, converting every error into an outcome
    pub fn process_file<W: TableWriter + ?Sized>(
        &self,
        file: &SourceFile,
        writer: &mut W,
    ) -> FileOutcome {
        let name = file.file_name();

        let content = match read_content(&file.path) {
            Ok(Some(content)) if !is_empty_content(&content) => content,
            Ok(Some(_)) => return skip(&name, format!("'{CONTENT_KEY}' is empty")),
            Ok(None) => return skip(&name, format!("no '{CONTENT_KEY}' key")),
            Err(e) => {
                tracing::error!("Failed to process {}: {}", name, e);
                return FileOutcome::Failed {
                    stage: FailureStage::Read,
                    error: e.to_string(),
                };
            }
        };

        let table = match self.builder.build(&content) {
            ShapeOutcome::Table(table) => table,
            ShapeOutcome::Unsupported { found } => {
                tracing::warn!(
                    "Unsupported '{}' structure in {}: found {} for mode {}",
                    CONTENT_KEY,
                    name,
                    found,
                    self.config.mode
                );
                return FileOutcome::Unsupported { found };
            }
        };

        tracing::info!(
            "Normalized {}: {} row(s), {} column(s)",
            name,
            table.num_rows(),
            table.num_columns()
        );

        match writer.write_table(&file.table_name, &table) {
            Ok(written) => {
                tracing::info!(
                    "Loaded table '{}' ({} rows)",
                    written.table,
                    written.rows
                );
                FileOutcome::Loaded {
                    rows: written.rows,
                    columns: written.columns.len(),
                }
            }
            Err(e) => {
                tracing::error!("Failed to write table '{}': {}", file.table_name, e);
                FileOutcome::Failed {
                    stage: FailureStage::Write,
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Note why the source folder could not be listed
fn record_listing_error(summary: &mut RunSummary, folder: &str, error: Error) {
    match error {
        Error::SourceFolder { path } => {
            tracing::warn!("Source folder '{}' does not exist", path);
            summary.folder_missing = true;
        }
        other => {
            tracing::error!("Failed to list source folder '{}': {}", folder, other);
            summary.listing_error = Some(other.to_string());
        }
    }
}

fn skip(name: &str, reason: String) -> FileOutcome {
    tracing::warn!("Skipping {}: {}", name, reason);
    FileOutcome::Skipped { reason }
}
