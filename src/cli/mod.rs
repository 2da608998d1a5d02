//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Output formatting (table, CSV, JSON)
//! - Streaming scan results to stdout

mod args;
mod dump;
mod output;

pub use args::Args;
pub use dump::{dump_rows, dump_schema};
pub use output::{format_timestamp, OutputFormat, OutputFormatter};
