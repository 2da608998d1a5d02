//! Error types for zeeksql-core.
//!
//! This module provides structured error types for all zeeksql-core operations:
//!
//! - [`enum@Error`] - Main error enum that wraps all error types
//! - [`HeaderError`] - Errors from parsing a Zeek log preamble
//! - [`SourceError`] - Errors from locating and opening log files
//!
//! Value-level problems (a non-numeric `count`, a malformed `time`) are not
//! errors: the row decoder turns them into NULLs.

use thiserror::Error;

/// Main error type for zeeksql-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The log preamble is not a usable Zeek header
    #[error("Invalid Zeek header: {0}")]
    Header(#[from] HeaderError),

    /// Error locating or opening input files
    #[error("{0}")]
    Source(#[from] SourceError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error attributed to a specific input file
    #[error("{path}: {source}")]
    InFile {
        path: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the offending file path to an error.
    pub fn in_file(path: impl Into<String>, err: impl Into<Error>) -> Self {
        Error::InFile {
            path: path.into(),
            source: Box::new(err.into()),
        }
    }

    /// The header error at the root of this error, if any.
    pub fn header_error(&self) -> Option<&HeaderError> {
        match self {
            Error::Header(e) => Some(e),
            Error::InFile { source, .. } => source.header_error(),
            _ => None,
        }
    }

    /// The path of the file this error is attributed to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::InFile { path, .. } => Some(path),
            Error::Source(SourceError::Open { path, .. }) => Some(path),
            _ => None,
        }
    }
}

/// Errors related to the `#`-directive preamble of a Zeek log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// No `#fields` directive (or an empty one)
    #[error("missing #fields directive")]
    MissingFieldsDirective,

    /// No `#types` directive (or an empty one)
    #[error("missing #types directive")]
    MissingTypesDirective,

    /// `#fields` and `#types` disagree on the column count
    #[error("mismatched #fields and #types count ({fields} fields, {types} types)")]
    FieldTypeCountMismatch { fields: usize, types: usize },
}

/// Errors related to locating and opening log files.
#[derive(Error, Debug)]
pub enum SourceError {
    /// A pattern matched nothing
    #[error("No files match pattern: {pattern}")]
    NoFilesMatched { pattern: String },

    /// A pattern could not be parsed as a glob
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A matched file could not be opened
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_file_keeps_header_kind() {
        let err = Error::in_file("conn.log", HeaderError::MissingTypesDirective);
        assert_eq!(err.path(), Some("conn.log"));
        assert_eq!(err.header_error(), Some(&HeaderError::MissingTypesDirective));
        assert_eq!(
            err.to_string(),
            "conn.log: Invalid Zeek header: missing #types directive"
        );
    }

    #[test]
    fn test_source_error_display() {
        let err = Error::from(SourceError::NoFilesMatched {
            pattern: "logs/*.log".to_string(),
        });
        assert_eq!(err.to_string(), "No files match pattern: logs/*.log");
        assert!(err.header_error().is_none());
    }
}
