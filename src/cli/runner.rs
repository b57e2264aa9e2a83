//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ModeArg, OutputFormat, TargetArg};
use crate::config::{load_env_file, DatabaseConfig};
use crate::database::{DatabaseEngine, Destination, DryRunWriter, TableWriter};
use crate::engine::{FileOutcome, LoadConfig, LoadEngine, RunSummary};
use crate::error::{Error, Result};
use crate::output::infer_column_type;
use crate::shape::{build_table, ShapeOutcome};
use crate::source::{read_content, table_name_for, CONTENT_KEY};
use serde_json::{json, Value};
use std::path::Path;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Everything succeeded
    Success,
    /// The run completed but at least one file or table failed
    CompletedWithFailures,
}

impl RunStatus {
    /// Process exit code for this status
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Success => 0,
            RunStatus::CompletedWithFailures => 2,
        }
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    ///
    /// Errors returned here are fatal; per-file problems are reported in
    /// the status instead.
    pub fn run(&self) -> Result<RunStatus> {
        load_env_file(&self.cli.env_file)?;

        match &self.cli.command {
            Commands::Load {
                source,
                mode,
                schema,
                dry_run,
            } => self.load(source, *mode, schema, *dry_run),
            Commands::Preview { file, mode, format } => Self::preview(file, *mode, *format),
            Commands::Check => self.check(),
        }
    }

    /// Resolve the destination from the global flags and environment
    fn destination(&self) -> Result<Destination> {
        match self.cli.target {
            TargetArg::Postgres => Ok(Destination::Postgres(DatabaseConfig::from_env()?)),
            TargetArg::Duckdb => {
                let path = self.cli.duckdb_path.as_ref().ok_or_else(|| {
                    Error::config("--duckdb-path is required with --target duckdb")
                })?;
                Ok(Destination::Duckdb(path.clone()))
            }
        }
    }

    /// Load every file of the source folder
    fn load(&self, source: &Path, mode: ModeArg, schema: &str, dry_run: bool) -> Result<RunStatus> {
        let config = LoadConfig::new(source)
            .with_mode(mode.into())
            .with_schema(schema)
            .with_dry_run(dry_run);
        let mut writer = self.writer_for(&config)?;

        let engine = LoadEngine::new(config);
        let summary = engine.run(writer.as_mut());
        Self::output_summary(&summary);

        if summary.has_failures() {
            Ok(RunStatus::CompletedWithFailures)
        } else {
            Ok(RunStatus::Success)
        }
    }

    /// Table writer for a load: the destination, or nothing on a dry run
    fn writer_for(&self, config: &LoadConfig) -> Result<Box<dyn TableWriter>> {
        if config.dry_run {
            tracing::info!("Dry run: nothing will be written");
            return Ok(Box::new(DryRunWriter::new()));
        }

        let destination = self.destination()?;
        tracing::info!(
            "Loading into {} (schema '{}')",
            destination.describe(),
            config.schema
        );
        Ok(Box::new(DatabaseEngine::open(&destination, &config.schema)?))
    }

    /// Shape one file and print its rows
    fn preview(file: &Path, mode: ModeArg, format: OutputFormat) -> Result<RunStatus> {
        let path = file.display().to_string();
        let table_name = table_name_for(file).unwrap_or_else(|| path.clone());

        let content = read_content(file)?
            .ok_or_else(|| Error::source_file(&path, format!("no '{CONTENT_KEY}' key")))?;

        let table = match build_table(&content, mode.into()) {
            ShapeOutcome::Table(table) => table,
            ShapeOutcome::Unsupported { found } => {
                return Err(Error::shape(
                    &table_name,
                    format!("unsupported '{CONTENT_KEY}' structure: {found}"),
                ));
            }
        };

        match format {
            OutputFormat::Json => {
                for record in table.to_records() {
                    println!("{}", serde_json::to_string(&record)?);
                }
            }
            OutputFormat::Pretty => {
                let columns: Vec<Value> = table
                    .columns()
                    .iter()
                    .map(|c| json!({ "name": c, "type": infer_column_type(&table, c).to_string() }))
                    .collect();

                let preview = json!({
                    "table": table_name,
                    "rows": table.num_rows(),
                    "columns": columns,
                    "records": table.to_records(),
                });
                println!("{}", serde_json::to_string_pretty(&preview)?);
            }
        }

        Ok(RunStatus::Success)
    }

    /// Check the destination connection
    fn check(&self) -> Result<RunStatus> {
        let destination = self.destination()?;
        let engine = DatabaseEngine::connect(&destination, crate::config::DEFAULT_SCHEMA)?;
        engine.check_connection()?;

        let tables = engine.list_tables()?;
        Self::output_message(&json!({
            "status": "SUCCEEDED",
            "destination": engine.connection_info(),
            "schema": engine.schema(),
            "tables": tables,
        }));

        Ok(RunStatus::Success)
    }

    /// Print the per-file outcome of a run
    fn output_summary(summary: &RunSummary) {
        if summary.folder_missing {
            Self::output_message(&json!({ "status": "NO_SOURCE_FOLDER" }));
            return;
        }
        if let Some(error) = &summary.listing_error {
            Self::output_message(&json!({ "status": "SOURCE_FOLDER_UNREADABLE", "error": error }));
            return;
        }

        let files: Vec<Value> = summary
            .reports
            .iter()
            .map(|report| {
                let detail = match &report.outcome {
                    FileOutcome::Loaded { rows, columns } => {
                        json!({ "status": "LOADED", "rows": rows, "columns": columns })
                    }
                    FileOutcome::Skipped { reason } => {
                        json!({ "status": "SKIPPED", "reason": reason })
                    }
                    FileOutcome::Unsupported { found } => {
                        json!({ "status": "UNSUPPORTED", "found": found })
                    }
                    FileOutcome::Failed { stage, error } => {
                        json!({ "status": "FAILED", "stage": stage.to_string(), "error": error })
                    }
                };
                json!({ "file": report.file, "table": report.table, "result": detail })
            })
            .collect();

        Self::output_message(&json!({
            "status": if summary.has_failures() { "COMPLETED_WITH_FAILURES" } else { "SUCCEEDED" },
            "loaded": summary.loaded(),
            "skipped": summary.skipped(),
            "failed": summary.failed(),
            "duration_ms": summary.duration_ms,
            "files": files,
        }));
    }

    /// Output a message
    fn output_message(msg: &Value) {
        println!("{}", serde_json::to_string(msg).unwrap_or_default());
    }
}
