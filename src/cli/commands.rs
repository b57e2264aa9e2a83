//! CLI commands and argument parsing

use crate::config::DEFAULT_SCHEMA;
use crate::engine::DEFAULT_SOURCE_DIR;
use crate::types::{ShapeMode, TargetKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Load folders of JSON exports into database tables
#[derive(Parser, Debug)]
#[command(name = "flatload")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Env file with DB_* variables (ignored if missing)
    #[arg(long, global = true, default_value = ".env")]
    pub env_file: PathBuf,

    /// Destination type
    #[arg(short, long, global = true, default_value = "postgres")]
    pub target: TargetArg,

    /// DuckDB database file (with --target duckdb)
    #[arg(long, global = true)]
    pub duckdb_path: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load every JSON file of a folder into its own table
    Load {
        /// Folder holding the JSON files
        #[arg(short, long, default_value = DEFAULT_SOURCE_DIR)]
        source: PathBuf,

        /// How `content` is shaped into rows
        #[arg(short, long, default_value = "flatten-all")]
        mode: ModeArg,

        /// Destination schema
        #[arg(long, default_value = DEFAULT_SCHEMA)]
        schema: String,

        /// Shape every file but write nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Shape a single file and print the resulting rows
    Preview {
        /// JSON file to shape
        file: PathBuf,

        /// How `content` is shaped into rows
        #[arg(short, long, default_value = "flatten-all")]
        mode: ModeArg,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Test connection to the destination
    Check,
}

/// Shape mode argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// One row per top-level key, nested fields flattened
    FlattenAll,
    /// Two columns: `id` and `description`
    IdDescriptionPairs,
    /// Mapping or sequence of records, empty columns dropped
    FlattenListOrDict,
}

impl From<ModeArg> for ShapeMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::FlattenAll => ShapeMode::FlattenAll,
            ModeArg::IdDescriptionPairs => ShapeMode::IdDescriptionPairs,
            ModeArg::FlattenListOrDict => ShapeMode::FlattenListOrDict,
        }
    }
}

/// Destination argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TargetArg {
    /// PostgreSQL configured through DB_* variables
    Postgres,
    /// Local DuckDB file
    Duckdb,
}

impl From<TargetArg> for TargetKind {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Postgres => TargetKind::Postgres,
            TargetArg::Duckdb => TargetKind::Duckdb,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let cli = Cli::try_parse_from(["flatload", "load"]).unwrap();
        assert_eq!(cli.target, TargetArg::Postgres);
        assert_eq!(cli.env_file, PathBuf::from(".env"));
        match cli.command {
            Commands::Load {
                source,
                mode,
                schema,
                dry_run,
            } => {
                assert_eq!(source, PathBuf::from("json_files/data1"));
                assert_eq!(ShapeMode::from(mode), ShapeMode::FlattenAll);
                assert_eq!(schema, "data");
                assert!(!dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_load_with_options() {
        let cli = Cli::try_parse_from([
            "flatload",
            "load",
            "--source",
            "exports",
            "--mode",
            "flatten-list-or-dict",
            "--dry-run",
            "--target",
            "duckdb",
            "--duckdb-path",
            "out.duckdb",
        ])
        .unwrap();

        assert_eq!(TargetKind::from(cli.target), TargetKind::Duckdb);
        assert_eq!(cli.duckdb_path, Some(PathBuf::from("out.duckdb")));
        assert!(matches!(
            cli.command,
            Commands::Load {
                mode: ModeArg::FlattenListOrDict,
                dry_run: true,
                ..
            }
        ));
    }

    #[test]
    fn test_preview_requires_file() {
        assert!(Cli::try_parse_from(["flatload", "preview"]).is_err());

        let cli =
            Cli::try_parse_from(["flatload", "preview", "a.json", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Preview {
                format: OutputFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["flatload", "load", "--mode", "melt"]).is_err());
    }
}
