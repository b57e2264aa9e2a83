//! Output module
//!
//! Converts shaped tables into Arrow RecordBatches and Parquet files.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Inferring one Arrow type per table column
//! - Converting a [`Table`](crate::shape::Table) to an Arrow RecordBatch
//! - Staging tables as Parquet files for the database

mod schema;
mod writer;

pub use schema::{infer_column_type, table_schema, table_to_arrow};
pub use writer::{stage_table, StagedFile, StagingConfig};
