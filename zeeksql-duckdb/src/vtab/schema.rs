//! `zeek_schema(pattern)`: the columns `read_zeek` would produce.
//!
//! ```sql
//! SELECT * FROM zeek_schema('logs/conn.log');
//! ```

use std::ffi::CString;
use std::sync::atomic::{AtomicUsize, Ordering};

use duckdb::core::{DataChunkHandle, Inserter, LogicalTypeHandle, LogicalTypeId};
use duckdb::vtab::{BindInfo, InitInfo, TableFunctionInfo, VTab};
use duckdb::Result as DuckResult;

use zeeksql_core::{LocalFileSystem, ResolvedSchema, ScanOptions, ZeekBinding};

use crate::error::DuckDbError;

/// Maximum rows per output chunk.
const BATCH_SIZE: usize = 2048;

/// One row of the schema table.
#[derive(Debug, Clone, PartialEq)]
struct ColumnInfo {
    name: String,
    zeek_type: String,
    column_type: String,
}

fn column_infos(schema: &ResolvedSchema) -> Vec<ColumnInfo> {
    schema
        .zeek_columns()
        .iter()
        .map(|column| ColumnInfo {
            name: column.name.clone(),
            zeek_type: column.zeek_type.clone(),
            column_type: column.kind.sql_type_name(),
        })
        .collect()
}

/// Bind data for zeek_schema().
pub struct SchemaBindData {
    columns: Vec<ColumnInfo>,
}

// Safety: BindData is read-only after construction
unsafe impl Send for SchemaBindData {}
unsafe impl Sync for SchemaBindData {}

/// Init data for zeek_schema().
pub struct SchemaInitData {
    current_row: AtomicUsize,
}

// Safety: InitData uses thread-safe primitives
unsafe impl Send for SchemaInitData {}
unsafe impl Sync for SchemaInitData {}

/// Table function that shows the schema of a Zeek log.
pub struct ZeekSchemaVTab;

impl VTab for ZeekSchemaVTab {
    type InitData = SchemaInitData;
    type BindData = SchemaBindData;

    fn bind(bind: &BindInfo) -> DuckResult<Self::BindData, Box<dyn std::error::Error>> {
        let pattern = bind.get_parameter(0).to_string();

        bind.add_result_column(
            "column_name",
            LogicalTypeHandle::from(LogicalTypeId::Varchar),
        );
        bind.add_result_column("zeek_type", LogicalTypeHandle::from(LogicalTypeId::Varchar));
        bind.add_result_column(
            "column_type",
            LogicalTypeHandle::from(LogicalTypeId::Varchar),
        );

        let binding = ZeekBinding::bind(&LocalFileSystem, &[pattern.as_str()], ScanOptions::default())
            .map_err(DuckDbError::from)?;

        Ok(SchemaBindData {
            columns: column_infos(binding.schema()),
        })
    }

    fn init(_: &InitInfo) -> DuckResult<Self::InitData, Box<dyn std::error::Error>> {
        Ok(SchemaInitData {
            current_row: AtomicUsize::new(0),
        })
    }

    fn func(
        func: &TableFunctionInfo<Self>,
        output: &mut DataChunkHandle,
    ) -> DuckResult<(), Box<dyn std::error::Error>> {
        let init_data = func.get_init_data();
        let bind_data = func.get_bind_data();

        let start = init_data.current_row.load(Ordering::Relaxed);
        let remaining = bind_data.columns.len().saturating_sub(start);
        let batch_size = remaining.min(BATCH_SIZE);

        if batch_size == 0 {
            output.set_len(0);
            return Ok(());
        }

        for i in 0..batch_size {
            let column = &bind_data.columns[start + i];
            let values = [&column.name, &column.zeek_type, &column.column_type];
            for (col_idx, value) in values.into_iter().enumerate() {
                let vector = output.flat_vector(col_idx);
                if let Ok(text) = CString::new(value.as_str()) {
                    vector.insert(i, text);
                }
            }
        }

        init_data
            .current_row
            .store(start + batch_size, Ordering::Relaxed);
        output.set_len(batch_size);

        Ok(())
    }

    fn parameters() -> Option<Vec<LogicalTypeHandle>> {
        Some(vec![LogicalTypeHandle::from(LogicalTypeId::Varchar)])
    }
}

/// Register the zeek_schema table function.
pub fn register(con: &duckdb::Connection) -> DuckResult<(), Box<dyn std::error::Error>> {
    con.register_table_function::<ZeekSchemaVTab>("zeek_schema")?;
    Ok(())
}
