//! Source folder scanning

use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Extension of the files picked up from the source folder
pub const SOURCE_EXTENSION: &str = "json";

/// A JSON file found in the source folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Destination table name (file name without extension)
    pub table_name: String,
}

impl SourceFile {
    /// Create a source file entry, deriving the table name from the path
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let table_name = table_name_for(&path)?;
        Some(Self { path, table_name })
    }

    /// File name for diagnostics
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Table name for a source path: the file name minus its extension
pub fn table_name_for(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
}

/// List the JSON files of a folder, sorted by file name
///
/// The extension match ignores case. Subfolders are not visited.
pub fn discover_files(dir: impl AsRef<Path>) -> Result<Vec<SourceFile>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::SourceFolder {
            path: dir.display().to_string(),
        });
    }

    let mut files: Vec<SourceFile> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list source folder {}", dir.display()))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_source_extension(path))
        .filter_map(SourceFile::new)
        .collect();

    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(SOURCE_EXTENSION))
}
