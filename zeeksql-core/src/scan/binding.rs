//! Bind-time work: pattern expansion, header parsing and schema resolution.

use tracing::debug;

use crate::error::{Error, Result, SourceError};
use crate::header::{parse_header, ZeekHeader};
use crate::io::{expand_patterns, LineReader, LogFileSystem};
use crate::schema::ResolvedSchema;

/// Default rows per batch, matching DuckDB's vector size.
pub const DEFAULT_BATCH_SIZE: usize = 2048;

/// Knobs for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum rows per batch
    pub batch_size: usize,
    /// Append a `filename` column with each row's source path
    pub filename: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            filename: false,
        }
    }
}

impl ScanOptions {
    pub fn with_filename(mut self, filename: bool) -> Self {
        self.filename = filename;
        self
    }

    /// Set the batch size; zero is bumped to one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

/// Immutable result of binding a scan.
///
/// The header comes from the first file in sorted order and is applied to
/// every file of the scan. Shared between bind and scan via `Arc`.
#[derive(Debug, Clone)]
pub struct ZeekBinding {
    files: Vec<String>,
    header: ZeekHeader,
    schema: ResolvedSchema,
    options: ScanOptions,
}

impl ZeekBinding {
    /// Expand `patterns`, parse the first file's header and resolve the schema.
    ///
    /// # Errors
    ///
    /// Fails when no file matches, when the first file cannot be opened, or
    /// when its header is invalid. Header errors carry the file path.
    pub fn bind<F, S>(fs: &F, patterns: &[S], options: ScanOptions) -> Result<Self>
    where
        F: LogFileSystem + ?Sized,
        S: AsRef<str>,
    {
        let files = expand_patterns(fs, patterns)?;
        let Some(first) = files.first() else {
            return Err(SourceError::NoFilesMatched {
                pattern: String::new(),
            }
            .into());
        };

        let mut reader = LineReader::new(fs.open(first)?);
        let header = parse_header(&mut reader).map_err(|e| Error::in_file(first.as_str(), e))?;
        let schema = ResolvedSchema::from_header(&header, options.filename);

        debug!(
            files = files.len(),
            columns = header.column_count(),
            stream = %header.stream_path,
            "bound Zeek scan"
        );

        Ok(Self {
            files,
            header,
            schema,
            options,
        })
    }

    /// Files of the scan, sorted and de-duplicated.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn header(&self) -> &ZeekHeader {
        &self.header
    }

    pub fn schema(&self) -> &ResolvedSchema {
        &self.schema
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }
}
