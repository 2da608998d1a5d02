//! `read_zeek(pattern, filename := false)` table function.
//!
//! Returns the rows of every Zeek log matching a glob pattern.
//!
//! ## Usage
//!
//! ```sql
//! SELECT * FROM read_zeek('logs/conn.log') LIMIT 100;
//!
//! -- Several rotated, compressed files with their source path
//! SELECT filename, count(*)
//! FROM read_zeek('logs/2024-01-*/conn.*.log.gz', filename := true)
//! GROUP BY filename;
//! ```

use std::sync::Arc;

use duckdb::core::{DataChunkHandle, LogicalTypeHandle, LogicalTypeId};
use duckdb::vtab::{BindInfo, InitInfo, TableFunctionInfo, VTab};
use duckdb::Result as DuckResult;
use parking_lot::Mutex;
use tracing::debug;

use zeeksql_core::{LocalFileSystem, ResolvedSchema, ScanOptions, ZeekBinding, ZeekScanner};

use crate::duckdb_schema::scan_columns;
use crate::error::DuckDbError;

use super::batch_builder::ChunkWriter;

/// Maximum rows per output chunk.
const BATCH_SIZE: usize = 2048;

/// Rows per chunk when a column holds lists of lists.
///
/// Nested list vectors only have `NESTED_LIST_CAPACITY` entries per chunk,
/// so one row per chunk keeps every inner list unless a single row
/// overflows it on its own.
const NESTED_BATCH_SIZE: usize = 1;

/// Named parameter enabling the provenance column.
const FILENAME_PARAMETER: &str = "filename";

/// Bind data: the resolved file set, header and schema.
///
/// This is shared across threads and should be considered read-only.
pub struct ReadZeekBindData {
    pub binding: Arc<ZeekBinding>,
    /// Rows per output chunk, at most `BATCH_SIZE`.
    pub batch_size: usize,
}

// Safety: BindData is read-only after construction
unsafe impl Send for ReadZeekBindData {}
unsafe impl Sync for ReadZeekBindData {}

/// Init data: the scan cursor for one invocation.
pub struct ReadZeekInitData {
    scanner: Mutex<ZeekScanner<LocalFileSystem>>,
}

// Safety: the scanner is only touched under the mutex, and the function
// runs single-threaded
unsafe impl Send for ReadZeekInitData {}
unsafe impl Sync for ReadZeekInitData {}

/// The read_zeek virtual table.
pub struct ReadZeekVTab;

impl VTab for ReadZeekVTab {
    type InitData = ReadZeekInitData;
    type BindData = ReadZeekBindData;

    fn bind(bind: &BindInfo) -> DuckResult<Self::BindData, Box<dyn std::error::Error>> {
        let pattern = bind.get_parameter(0).to_string();
        if pattern.is_empty() {
            return Err(Box::new(DuckDbError::InvalidParameter(
                "read_zeek requires a file path or glob pattern".to_string(),
            )));
        }

        let filename = match bind.get_named_parameter(FILENAME_PARAMETER) {
            Some(value) => parse_bool_parameter(FILENAME_PARAMETER, &value.to_string())?,
            None => false,
        };
        let options = ScanOptions::default()
            .with_batch_size(BATCH_SIZE)
            .with_filename(filename);

        let binding =
            ZeekBinding::bind(&LocalFileSystem, &[pattern.as_str()], options).map_err(DuckDbError::from)?;
        let batch_size = batch_size_for(binding.schema());
        if batch_size < BATCH_SIZE {
            debug!(batch_size, "nested list columns, shrinking chunks");
        }

        for (name, logical_type) in scan_columns(binding.schema()) {
            bind.add_result_column(name, logical_type);
        }
        debug!(pattern = %pattern, files = binding.files().len(), "read_zeek bound");

        Ok(ReadZeekBindData {
            binding: Arc::new(binding),
            batch_size,
        })
    }

    fn init(init: &InitInfo) -> DuckResult<Self::InitData, Box<dyn std::error::Error>> {
        let bind_data = unsafe { &*init.get_bind_data::<ReadZeekBindData>() };
        init.set_max_threads(1);

        let scanner = ZeekScanner::new(LocalFileSystem, Arc::clone(&bind_data.binding));
        Ok(ReadZeekInitData {
            scanner: Mutex::new(scanner),
        })
    }

    fn func(
        func: &TableFunctionInfo<Self>,
        output: &mut DataChunkHandle,
    ) -> DuckResult<(), Box<dyn std::error::Error>> {
        let init_data = func.get_init_data();
        let bind_data = func.get_bind_data();

        let mut scanner = init_data.scanner.lock();
        let mut writer = ChunkWriter::new(output, bind_data.binding.schema());
        scanner
            .next_batch(&mut writer, bind_data.batch_size)
            .map_err(DuckDbError::from)?;
        Ok(())
    }

    fn parameters() -> Option<Vec<LogicalTypeHandle>> {
        Some(vec![
            LogicalTypeHandle::from(LogicalTypeId::Varchar), // pattern
        ])
    }

    fn named_parameters() -> Option<Vec<(String, LogicalTypeHandle)>> {
        Some(vec![(
            FILENAME_PARAMETER.to_string(),
            LogicalTypeHandle::from(LogicalTypeId::Boolean),
        )])
    }
}

/// Chunk size for a schema; see [`NESTED_BATCH_SIZE`].
fn batch_size_for(schema: &ResolvedSchema) -> usize {
    let nested = schema
        .output_columns()
        .any(|(_, kind)| kind.list_inner().is_some_and(|inner| inner.list_inner().is_some()));
    if nested {
        NESTED_BATCH_SIZE
    } else {
        BATCH_SIZE
    }
}

/// Interpret the text form of a BOOLEAN parameter.
fn parse_bool_parameter(name: &str, text: &str) -> Result<bool, DuckDbError> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(DuckDbError::InvalidParameter(format!(
            "{name} must be a boolean, got '{text}'"
        ))),
    }
}

/// Register the read_zeek table function.
pub fn register(con: &duckdb::Connection) -> DuckResult<(), Box<dyn std::error::Error>> {
    con.register_table_function::<ReadZeekVTab>("read_zeek")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeeksql_core::ZeekHeader;

    #[test]
    fn test_parse_bool_parameter() {
        assert!(parse_bool_parameter("filename", "true").unwrap());
        assert!(parse_bool_parameter("filename", "TRUE").unwrap());
        assert!(!parse_bool_parameter("filename", "false").unwrap());
        assert!(parse_bool_parameter("filename", "maybe").is_err());
    }

    fn schema(types: &[&str]) -> ResolvedSchema {
        let header = ZeekHeader {
            fields: (0..types.len()).map(|i| format!("c{i}")).collect(),
            types: types.iter().map(|t| t.to_string()).collect(),
            ..ZeekHeader::default()
        };
        ResolvedSchema::from_header(&header, true)
    }

    #[test]
    fn test_nested_lists_shrink_chunks() {
        assert_eq!(batch_size_for(&schema(&["count", "set[string]"])), BATCH_SIZE);
        assert_eq!(
            batch_size_for(&schema(&["count", "vector[vector[double]]"])),
            NESTED_BATCH_SIZE
        );
    }
}
