//! Convenient re-exports for common usage.
//!
//! ```rust,no_run
//! use zeeksql_core::prelude::*;
//!
//! let binding = ZeekBinding::bind(&LocalFileSystem, &["conn.log"], ScanOptions::default());
//! ```

// Schema types
pub use crate::schema::{ColumnDescriptor, DataKind, ResolvedSchema};

// Decoding
pub use crate::decode::{ColumnBatch, ColumnSink, FieldValue, OwnedFieldValue};

// Scanning
pub use crate::header::ZeekHeader;
pub use crate::scan::{ScanOptions, ScanPhase, ZeekBinding, ZeekScanner};

// I/O types
pub use crate::io::{LocalFileSystem, LogFileSystem, MemoryFileSystem};

// Error types
pub use crate::error::{Error, Result};
