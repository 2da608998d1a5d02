//! DuckDB-specific error types.

use thiserror::Error;

/// Errors that can occur in the DuckDB extension.
#[derive(Error, Debug)]
pub enum DuckDbError {
    #[error("{0}")]
    Zeek(#[from] zeeksql_core::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
