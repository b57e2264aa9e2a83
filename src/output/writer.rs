//! Parquet staging files
//!
//! A table is written to a temporary Parquet file which the database then
//! reads with `read_parquet`. The file is removed when its handle drops.

use super::schema::table_to_arrow;
use crate::error::{Error, Result};
use crate::shape::Table;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Settings for staging files
#[derive(Debug, Clone)]
pub struct StagingConfig {
    compression: Compression,
    row_group_size: usize,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: 122_880, // DuckDB row group size
        }
    }
}

impl StagingConfig {
    /// Create a config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression algorithm
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set row group size
    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size.max(1);
        self
    }

    /// Get row group size
    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    fn properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build()
    }
}

/// A table staged on disk, deleted on drop
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    rows: usize,
}

impl StagedFile {
    /// Location of the Parquet file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows written to the file
    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    "Failed to remove staging file {}: {e}",
                    self.path.display()
                );
            }
        }
    }
}

/// Write a table to a Parquet staging file
///
/// A partially written file is removed when writing fails.
pub fn stage_table(
    table: &Table,
    path: impl Into<PathBuf>,
    config: &StagingConfig,
) -> Result<StagedFile> {
    let batch = table_to_arrow(table)?;
    let path = path.into();

    let file = File::create(&path).map_err(|e| Error::Output {
        message: format!("Failed to create staging file {}: {e}", path.display()),
    })?;
    let staged = StagedFile {
        path,
        rows: batch.num_rows(),
    };

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(config.properties()))?;
    writer.write(&batch)?;
    writer.close()?;

    tracing::debug!(
        "Staged {} row(s) at {}",
        staged.rows,
        staged.path.display()
    );
    Ok(staged)
}
