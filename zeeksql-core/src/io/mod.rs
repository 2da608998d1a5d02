//! Input plumbing: file systems, decompression and line reading.
//!
//! - [`LogFileSystem`] - pattern expansion and file opening
//! - [`LocalFileSystem`] - disk-backed implementation with decompression
//! - [`MemoryFileSystem`] - in-memory implementation
//! - [`LineReader`] - the line primitive shared by header parsing and scanning

mod decompress;
mod line;
mod source;

pub use decompress::{Compression, DecompressReader, FileDecoder};
pub use line::LineReader;
pub use source::{expand_patterns, LocalFileSystem, LogFileSystem, MemoryFileSystem};
