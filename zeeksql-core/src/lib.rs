//! # zeeksql-core
//!
//! Engine-agnostic reader for Zeek (formerly Bro) TSV logs.
//!
//! This crate turns Zeek's self-describing text logs into typed, columnar
//! batches without depending on any SQL engine. The DuckDB extension and the
//! `zeeksql` CLI are thin layers on top of it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zeeksql_core::prelude::*;
//!
//! let fs = LocalFileSystem::new();
//! let binding = ZeekBinding::bind(&fs, &["logs/conn.*.log.gz"], ScanOptions::default()).unwrap();
//! let binding = Arc::new(binding);
//!
//! let mut scanner = ZeekScanner::new(fs, Arc::clone(&binding));
//! let mut batch = ColumnBatch::new(binding.schema().len());
//! while scanner.next_batch(&mut batch, 2048).unwrap() > 0 {
//!     for row in batch.rows() {
//!         println!("{row:?}");
//!     }
//!     batch.clear();
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        zeeksql-core                                 |
//! +---------------------------------------------------------------------+
//! |  header/     - escape decoding, #-directive parsing, ZeekHeader     |
//! |  schema/     - Zeek type mapping, DataKind, ResolvedSchema          |
//! |  decode/     - FieldValue, row decoding, ColumnSink, ColumnBatch    |
//! |  scan/       - ZeekBinding, multi-file ZeekScanner                  |
//! |  io/         - LogFileSystem, line reading, decompression           |
//! |  error/      - Error types                                          |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Crate Features
//!
//! - `default` - Zstd decompression enabled (gzip is always available)
//! - `compress-zstd` - Zstd decompression support
//! - `compress-lz4` - LZ4 decompression support
//! - `compress-bzip2` - Bzip2 decompression support
//! - `compress-xz` - XZ decompression support
//! - `compress-all` - All compression formats

pub mod decode;
pub mod error;
pub mod header;
pub mod io;
pub mod prelude;
pub mod scan;
pub mod schema;

// Re-export commonly used types at crate root for convenience
pub use decode::{
    decode_field, decode_row, parse_epoch_micros, ColumnBatch, ColumnSink, FieldValue,
    OwnedFieldValue,
};
pub use error::{Error, HeaderError, Result, SourceError};
pub use header::{decode_escapes, parse_header, ZeekHeader};
pub use io::{
    expand_patterns, Compression, LineReader, LocalFileSystem, LogFileSystem, MemoryFileSystem,
};
pub use scan::{ScanOptions, ScanPhase, ZeekBinding, ZeekScanner, DEFAULT_BATCH_SIZE};
pub use schema::{resolve_zeek_type, ColumnDescriptor, DataKind, ResolvedSchema, FILENAME_COLUMN};
