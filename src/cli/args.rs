//! Command-line argument definitions.

use clap::Parser;
use zeeksql_core::{ScanOptions, DEFAULT_BATCH_SIZE};

use super::OutputFormat;

/// Read Zeek (Bro) TSV logs as typed rows.
#[derive(Parser, Debug)]
#[command(name = "zeeksql")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Zeek log files or glob patterns (plain, gzip or zstd)
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Show the resolved column schema instead of rows
    #[arg(long = "schema")]
    pub show_schema: bool,

    /// Output format for stdout
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Append a `filename` column with each row's source file
    #[arg(long = "filename")]
    pub filename: bool,

    /// Stop after this many rows
    #[arg(short = 'n', long = "limit", value_name = "ROWS")]
    pub limit: Option<usize>,

    /// Rows decoded per batch
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Scan options derived from the flags.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::default()
            .with_batch_size(self.batch_size)
            .with_filename(self.filename)
    }

    /// Default log filter for the `-v` count.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["zeeksql", "conn.log"]).unwrap();
        assert_eq!(args.patterns, vec!["conn.log"]);
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.scan_options(), ScanOptions::default());
        assert_eq!(args.log_filter(), "warn");
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "zeeksql",
            "--format",
            "json",
            "--filename",
            "-n",
            "5",
            "--batch-size",
            "100",
            "-vv",
            "a.log",
            "logs/*.gz",
        ])
        .unwrap();
        assert_eq!(args.patterns, vec!["a.log", "logs/*.gz"]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.scan_options().batch_size, 100);
        assert!(args.scan_options().filename);
        assert_eq!(args.log_filter(), "debug");
    }

    #[test]
    fn test_pattern_required() {
        assert!(Args::try_parse_from(["zeeksql"]).is_err());
    }
}
