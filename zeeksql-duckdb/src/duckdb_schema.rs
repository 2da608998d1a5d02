//! Convert zeeksql-core schema types to DuckDB types.

use duckdb::core::{LogicalTypeHandle, LogicalTypeId};
use zeeksql_core::schema::{DataKind, ResolvedSchema};

/// Convert a DataKind to a DuckDB LogicalTypeHandle.
pub fn to_duckdb_type(kind: &DataKind) -> LogicalTypeHandle {
    match kind {
        DataKind::Bool => LogicalTypeHandle::from(LogicalTypeId::Boolean),
        DataKind::UInt64 => LogicalTypeHandle::from(LogicalTypeId::UBigint),
        DataKind::Int64 => LogicalTypeHandle::from(LogicalTypeId::Bigint),
        DataKind::Float64 => LogicalTypeHandle::from(LogicalTypeId::Double),
        DataKind::String => LogicalTypeHandle::from(LogicalTypeId::Varchar),
        // Stored as microseconds since the epoch, UTC
        DataKind::TimestampMicros => LogicalTypeHandle::from(LogicalTypeId::TimestampTZ),
        DataKind::List(inner) => {
            let inner_type = to_duckdb_type(inner);
            LogicalTypeHandle::list(&inner_type)
        }
    }
}

/// `(name, type)` for every output column of a scan, provenance included.
pub fn scan_columns(schema: &ResolvedSchema) -> Vec<(&str, LogicalTypeHandle)> {
    schema
        .output_columns()
        .map(|(name, kind)| (name, to_duckdb_type(kind)))
        .collect()
}

// Note: Unit tests for type conversion are not possible in a loadable extension
// because the DuckDB API is not initialized until the extension is loaded.
// The SQL spellings are covered by DataKind::sql_type_name in zeeksql-core.
