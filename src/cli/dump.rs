//! Drive a scan and stream its rows (or its schema) through a formatter.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use zeeksql_core::{ColumnBatch, FieldValue, LogFileSystem, ZeekBinding, ZeekScanner};

use super::{OutputFormat, OutputFormatter};

/// Scan every file of `binding` and write up to `limit` rows.
///
/// Returns the number of rows written.
pub fn dump_rows<F, W>(
    fs: F,
    binding: Arc<ZeekBinding>,
    format: OutputFormat,
    limit: Option<usize>,
    writer: &mut W,
) -> Result<usize>
where
    F: LogFileSystem,
    W: Write,
{
    let columns = binding
        .schema()
        .output_columns()
        .map(|(name, _)| name.to_string())
        .collect();
    let mut formatter = OutputFormatter::new(format, columns);
    let mut batch = ColumnBatch::new(binding.schema().len());
    let batch_size = binding.options().batch_size;
    let mut scanner = ZeekScanner::new(fs, Arc::clone(&binding));

    formatter.begin(writer)?;
    let mut written = 0;
    loop {
        let remaining = limit.map_or(usize::MAX, |limit| limit - written);
        if remaining == 0 {
            break;
        }

        // A batch never exceeds what is left of the limit
        batch.clear();
        let rows = scanner
            .next_batch(&mut batch, batch_size.min(remaining))
            .context("Failed to read Zeek logs")?;
        if rows == 0 {
            break;
        }

        for row in batch.rows() {
            formatter.write_row(&row, writer)?;
        }
        written += rows;
    }
    formatter.finish(writer)?;

    debug!(rows = written, "dump finished");
    Ok(written)
}

/// Write one row per Zeek column: name, Zeek type and SQL type.
pub fn dump_schema<W: Write>(binding: &ZeekBinding, format: OutputFormat, writer: &mut W) -> Result<()> {
    let columns = ["column_name", "zeek_type", "column_type"]
        .map(String::from)
        .to_vec();
    let mut formatter = OutputFormatter::new(format, columns);

    formatter.begin(writer)?;
    for column in binding.schema().zeek_columns() {
        let sql_type = column.kind.sql_type_name();
        let row = [
            FieldValue::Str(&column.name),
            FieldValue::Str(&column.zeek_type),
            FieldValue::Str(&sql_type),
        ];
        formatter.write_row(&row, writer)?;
    }
    formatter.finish(writer)?;
    Ok(())
}
