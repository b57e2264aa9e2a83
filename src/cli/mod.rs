//! CLI module
//!
//! Command-line interface for loading JSON exports.
//!
//! # Commands
//!
//! - `load` - Load every JSON file of a folder into its own table
//! - `preview` - Shape one file and print the rows
//! - `check` - Test connection to the destination

mod commands;
mod runner;

pub use commands::{Cli, Commands, ModeArg, OutputFormat, TargetArg};
pub use runner::{RunStatus, Runner};
