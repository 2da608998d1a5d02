//! zeeksql-duckdb: DuckDB extension for Zeek logs.
//!
//! This extension provides table functions for querying Zeek (Bro) TSV logs
//! using SQL.
//!
//! ## Usage
//!
//! ```sql
//! -- Load the extension
//! LOAD 'zeek.duckdb_extension';
//!
//! -- Read a single log
//! SELECT * FROM read_zeek('conn.log') LIMIT 10;
//!
//! -- Read rotated, compressed logs and keep track of the source file
//! SELECT filename, count(*) FROM read_zeek('logs/*/dns.*.log.gz', filename := true)
//! GROUP BY filename;
//!
//! -- Inspect the schema
//! SELECT * FROM zeek_schema('conn.log');
//! ```

mod duckdb_schema;
mod error;
mod vtab;

pub use duckdb_schema::{scan_columns, to_duckdb_type};
pub use error::DuckDbError;
pub use vtab::{register_read_zeek, register_zeek_schema, ReadZeekVTab, ZeekSchemaVTab};
pub use zeeksql_core;

// Required imports for the duckdb_entrypoint_c_api macro
use duckdb::ffi;
use duckdb::Connection;
use duckdb_loadable_macros::duckdb_entrypoint_c_api;

/// Extension name.
pub const EXTENSION_NAME: &str = "zeek";

/// Extension version.
pub const EXTENSION_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extension entry point called by DuckDB when loading.
///
/// Registers all table functions.
#[duckdb_entrypoint_c_api(ext_name = "zeek")]
pub unsafe fn zeek_init(con: Connection) -> duckdb::Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Loading {} v{} extension",
        EXTENSION_NAME,
        EXTENSION_VERSION
    );

    vtab::register_read_zeek(&con)?;
    vtab::register_zeek_schema(&con)?;

    Ok(())
}

/// Get extension metadata.
pub fn extension_info() -> (&'static str, &'static str) {
    (EXTENSION_NAME, EXTENSION_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_info() {
        let (name, version) = extension_info();
        assert_eq!(name, "zeek");
        assert!(!version.is_empty());
    }
}
