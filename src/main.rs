//! zeeksql CLI entry point.

use std::io::{self, BufWriter};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use zeeksql::cli::{dump_rows, dump_schema, Args};
use zeeksql_core::{LocalFileSystem, ZeekBinding};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_filter().into()),
        )
        .init();

    let fs = LocalFileSystem::new();
    let binding = ZeekBinding::bind(&fs, args.patterns.as_slice(), args.scan_options())
        .with_context(|| format!("Failed to open Zeek logs: {}", args.patterns.join(" ")))?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    if args.show_schema {
        return dump_schema(&binding, args.format, &mut writer);
    }

    dump_rows(fs, Arc::new(binding), args.format, args.limit, &mut writer)?;
    Ok(())
}
