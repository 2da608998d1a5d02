//! zeeksql - Read Zeek (Bro) TSV logs as typed rows.
//!
//! The heavy lifting lives in `zeeksql-core`; this crate is the command-line
//! front end that prints scan results as a table, CSV or JSON Lines.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use zeeksql::cli::{dump_rows, OutputFormat};
//! use zeeksql_core::{LocalFileSystem, ScanOptions, ZeekBinding};
//!
//! fn main() -> anyhow::Result<()> {
//!     let fs = LocalFileSystem::new();
//!     let binding = Arc::new(ZeekBinding::bind(&fs, &["conn.log"], ScanOptions::default())?);
//!     dump_rows(fs, binding, OutputFormat::Json, Some(10), &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```

pub mod cli;

pub use zeeksql_core;
