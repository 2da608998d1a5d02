//! File system abstractions for locating and opening Zeek logs.
//!
//! The scanner never touches `std::fs` directly: it asks a [`LogFileSystem`]
//! to expand patterns and to open byte streams. This keeps decompression and
//! path handling out of the hot loop and lets tests run against in-memory
//! files.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read, Seek, SeekFrom};

use tracing::debug;

use super::decompress::{Compression, FileDecoder};
use crate::error::{Result, SourceError};

/// Buffer size for file readers (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Source of log files.
///
/// This trait uses an associated type for `Reader` so the scanner's line
/// loop is statically dispatched.
pub trait LogFileSystem {
    /// Buffered byte stream returned by [`LogFileSystem::open`].
    type Reader: BufRead;

    /// Open a file for sequential reading, decompressing if needed.
    fn open(&self, path: &str) -> Result<Self::Reader>;

    /// Expand a glob pattern into matching paths.
    ///
    /// Must fail with [`SourceError::NoFilesMatched`] when nothing matches.
    fn glob(&self, pattern: &str) -> Result<Vec<String>>;
}

/// Expand several patterns into one sorted, de-duplicated file list.
///
/// Sorting makes multi-file scans deterministic regardless of the order the
/// file system reports matches in.
pub fn expand_patterns<F, S>(fs: &F, patterns: &[S]) -> Result<Vec<String>>
where
    F: LogFileSystem + ?Sized,
    S: AsRef<str>,
{
    let mut files = BTreeSet::new();
    for pattern in patterns {
        files.extend(fs.glob(pattern.as_ref())?);
    }
    Ok(files.into_iter().collect())
}

/// Local file system with transparent decompression.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a local file system handle.
    pub fn new() -> Self {
        Self
    }
}

impl LogFileSystem for LocalFileSystem {
    type Reader = BufReader<FileDecoder>;

    fn open(&self, path: &str) -> Result<Self::Reader> {
        let open_error = |source| SourceError::Open {
            path: path.to_string(),
            source,
        };

        let mut file = File::open(path).map_err(open_error)?;

        // Read first bytes to detect compression
        let mut magic = [0u8; Compression::MAGIC_LEN];
        let bytes_read = read_prefix(&mut file, &mut magic).map_err(open_error)?;
        let compression = Compression::detect(&magic[..bytes_read]);

        // Seek back to start
        file.seek(SeekFrom::Start(0)).map_err(open_error)?;

        debug!(path, %compression, "opening Zeek log");
        let decoder = FileDecoder::new(file, compression).map_err(open_error)?;
        Ok(BufReader::with_capacity(BUFFER_SIZE, decoder))
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>> {
        let entries = glob::glob(pattern).map_err(|e| SourceError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => match path.to_str() {
                    Some(path_str) => paths.push(path_str.to_string()),
                    None => debug!(path = %path.display(), "skipping non UTF-8 path"),
                },
                Ok(_) => {}
                // Permission errors on individual entries do not fail the glob
                Err(e) => debug!(error = %e, "error accessing path during glob"),
            }
        }

        if paths.is_empty() {
            return Err(SourceError::NoFilesMatched {
                pattern: pattern.to_string(),
            }
            .into());
        }

        paths.sort();
        Ok(paths)
    }
}

/// Fill `buf` as far as the reader allows; returns the byte count.
fn read_prefix<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// In-memory file system keyed by path.
///
/// Files are stored as plain (already decompressed) bytes. Useful for tests,
/// fuzzing and embedding logs that did not come from disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryFileSystem {
    /// Create an empty file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder-style [`MemoryFileSystem::insert`].
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }
}

impl LogFileSystem for MemoryFileSystem {
    type Reader = Cursor<Vec<u8>>;

    fn open(&self, path: &str) -> Result<Self::Reader> {
        self.files
            .get(path)
            .map(|data| Cursor::new(data.clone()))
            .ok_or_else(|| {
                SourceError::Open {
                    path: path.to_string(),
                    source: std::io::ErrorKind::NotFound.into(),
                }
                .into()
            })
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = glob::Pattern::new(pattern).map_err(|e| SourceError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let paths: Vec<String> = self
            .files
            .keys()
            .filter(|path| matcher.matches(path))
            .cloned()
            .collect();

        if paths.is_empty() {
            return Err(SourceError::NoFilesMatched {
                pattern: pattern.to_string(),
            }
            .into());
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_memory_glob_sorted() {
        let fs = MemoryFileSystem::new()
            .with_file("logs/b.log", "b")
            .with_file("logs/a.log", "a")
            .with_file("other/c.log", "c");

        assert_eq!(
            fs.glob("logs/*.log").unwrap(),
            vec!["logs/a.log", "logs/b.log"]
        );
    }

    #[test]
    fn test_memory_glob_no_match() {
        let fs = MemoryFileSystem::new().with_file("a.log", "a");
        let err = fs.glob("*.gz").unwrap_err();
        assert!(matches!(
            err,
            Error::Source(SourceError::NoFilesMatched { .. })
        ));
    }

    #[test]
    fn test_expand_patterns_sorts_and_dedups() {
        let fs = MemoryFileSystem::new()
            .with_file("b.log", "b")
            .with_file("a.log", "a");

        let files = expand_patterns(&fs, &["b.log", "a.log", "*.log"]).unwrap();
        assert_eq!(files, vec!["a.log", "b.log"]);
    }

    #[test]
    fn test_local_glob_and_open() {
        let dir = TempDir::new().unwrap();
        for name in ["dns.log", "conn.log"] {
            let mut file = File::create(dir.path().join(name)).unwrap();
            writeln!(file, "#fields\ta").unwrap();
        }

        let pattern = format!("{}/*.log", dir.path().display());
        let files = LocalFileSystem.glob(&pattern).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("conn.log"));

        let mut reader = LocalFileSystem.open(&files[0]).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "#fields\ta\n");
    }

    #[test]
    fn test_local_glob_no_match() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.log", dir.path().display());
        let err = LocalFileSystem.glob(&pattern).unwrap_err();
        assert!(matches!(
            err,
            Error::Source(SourceError::NoFilesMatched { .. })
        ));
    }

    #[test]
    fn test_local_open_missing_file() {
        let err = LocalFileSystem.open("/nonexistent/zeek/conn.log").unwrap_err();
        assert_eq!(err.path(), Some("/nonexistent/zeek/conn.log"));
    }

    #[test]
    fn test_local_open_tiny_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tiny.log");
        std::fs::write(&path, "#").unwrap();

        let mut reader = LocalFileSystem.open(path.to_str().unwrap()).unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, "#");
    }
}
