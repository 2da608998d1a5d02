//! Output formatting for decoded rows.
//!
//! Rows are rendered as a table, CSV or JSON Lines. Timestamps are shown in
//! RFC 3339 (UTC, microsecond precision) in every format.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use comfy_table::{Cell, Table};
use zeeksql_core::FieldValue;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table (default)
    Table,
    /// Comma-separated values
    Csv,
    /// JSON Lines (one JSON object per row)
    Json,
}

/// Formats rows for output.
///
/// Call [`OutputFormatter::begin`] once, [`OutputFormatter::write_row`] per
/// row and [`OutputFormatter::finish`] at the end. CSV and JSON stream rows
/// as they come; the table is rendered in `finish`.
pub struct OutputFormatter {
    format: OutputFormat,
    columns: Vec<String>,
    table: Table,
}

impl OutputFormatter {
    /// Create a new formatter with the specified format and column names.
    pub fn new(format: OutputFormat, columns: Vec<String>) -> Self {
        let mut table = Table::new();
        table.set_header(columns.iter().map(Cell::new));
        Self {
            format,
            columns,
            table,
        }
    }

    pub fn begin<W: Write>(&mut self, writer: &mut W) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Csv => {
                let headers: Vec<String> = self.columns.iter().map(|c| csv_escape(c)).collect();
                writeln!(writer, "{}", headers.join(","))
            }
            OutputFormat::Table | OutputFormat::Json => Ok(()),
        }
    }

    pub fn write_row<W: Write>(
        &mut self,
        row: &[FieldValue<'_>],
        writer: &mut W,
    ) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Table => {
                self.table
                    .add_row(row.iter().map(|value| Cell::new(format_value(value))));
                Ok(())
            }
            OutputFormat::Csv => {
                let values: Vec<String> = row
                    .iter()
                    .map(|value| csv_escape(&format_value(value)))
                    .collect();
                writeln!(writer, "{}", values.join(","))
            }
            OutputFormat::Json => {
                let mut obj = serde_json::Map::new();
                for (name, value) in self.columns.iter().zip(row) {
                    obj.insert(name.clone(), json_value(value));
                }
                writeln!(writer, "{}", serde_json::Value::Object(obj))
            }
        }
    }

    pub fn finish<W: Write>(&mut self, writer: &mut W) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Table => writeln!(writer, "{}", self.table),
            OutputFormat::Csv | OutputFormat::Json => writer.flush(),
        }
    }
}

/// Render a timestamp, falling back to raw microseconds when out of range.
pub fn format_timestamp(micros: i64) -> String {
    match DateTime::<Utc>::from_timestamp_micros(micros) {
        Some(ts) => ts.to_rfc3339_opts(SecondsFormat::Micros, true),
        None => micros.to_string(),
    }
}

/// Text form of a value; NULL is empty at the top level.
fn format_value(value: &FieldValue<'_>) -> String {
    match value {
        FieldValue::Null => String::new(),
        other => format_inner(other),
    }
}

fn format_inner(value: &FieldValue<'_>) -> String {
    match value {
        FieldValue::Null => "null".to_string(),
        FieldValue::Bool(v) => v.to_string(),
        FieldValue::UInt64(v) => v.to_string(),
        FieldValue::Int64(v) => v.to_string(),
        FieldValue::Float64(v) => v.to_string(),
        FieldValue::Timestamp(v) => format_timestamp(*v),
        FieldValue::Str(s) => s.to_string(),
        FieldValue::OwnedString(s) => s.to_string(),
        FieldValue::List(items) => {
            let items: Vec<String> = items.iter().map(format_inner).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

fn json_value(value: &FieldValue<'_>) -> serde_json::Value {
    match value {
        FieldValue::Null => serde_json::Value::Null,
        FieldValue::Bool(v) => serde_json::Value::Bool(*v),
        FieldValue::UInt64(v) => serde_json::Value::Number((*v).into()),
        FieldValue::Int64(v) => serde_json::Value::Number((*v).into()),
        FieldValue::Float64(v) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        FieldValue::Timestamp(v) => serde_json::Value::String(format_timestamp(*v)),
        FieldValue::Str(s) => serde_json::Value::String(s.to_string()),
        FieldValue::OwnedString(s) => serde_json::Value::String(s.to_string()),
        FieldValue::List(items) => serde_json::Value::Array(items.iter().map(json_value).collect()),
    }
}

// Escape commas, quotes and newlines
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        vec!["ts".into(), "uid".into(), "orig_bytes".into(), "tags".into()]
    }

    fn rows() -> Vec<Vec<FieldValue<'static>>> {
        vec![
            vec![
                FieldValue::Timestamp(1_234_567_890_500_000),
                FieldValue::Str("CHhAvVGS1DHFjwGM9"),
                FieldValue::UInt64(42),
                FieldValue::List(vec![FieldValue::Str("a"), FieldValue::Null]),
            ],
            vec![
                FieldValue::Timestamp(0),
                FieldValue::Str("C,quoted\"uid"),
                FieldValue::Null,
                FieldValue::List(vec![]),
            ],
        ]
    }

    fn render(format: OutputFormat) -> String {
        let mut formatter = OutputFormatter::new(format, columns());
        let mut output = Vec::new();
        formatter.begin(&mut output).unwrap();
        for row in rows() {
            formatter.write_row(&row, &mut output).unwrap();
        }
        formatter.finish(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(1_234_567_890_500_000),
            "2009-02-13T23:31:30.500000Z"
        );
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn test_table_output() {
        let output = render(OutputFormat::Table);
        assert!(output.contains("orig_bytes"));
        assert!(output.contains("2009-02-13T23:31:30.500000Z"));
        assert!(output.contains("[a, null]"));
        assert!(output.contains("42"));
    }

    #[test]
    fn test_csv_output() {
        let output = render(OutputFormat::Csv);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "ts,uid,orig_bytes,tags");
        assert_eq!(
            lines[1],
            "2009-02-13T23:31:30.500000Z,CHhAvVGS1DHFjwGM9,42,\"[a, null]\""
        );
        assert_eq!(
            lines[2],
            "1970-01-01T00:00:00.000000Z,\"C,quoted\"\"uid\",,[]"
        );
    }

    #[test]
    fn test_csv_header_without_rows() {
        let mut formatter = OutputFormatter::new(OutputFormat::Csv, columns());
        let mut output = Vec::new();
        formatter.begin(&mut output).unwrap();
        formatter.finish(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "ts,uid,orig_bytes,tags\n");
    }

    #[test]
    fn test_json_output() {
        let output = render(OutputFormat::Json);
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["ts"], "2009-02-13T23:31:30.500000Z");
        assert_eq!(lines[0]["orig_bytes"], 42);
        assert_eq!(lines[0]["tags"], serde_json::json!(["a", null]));
        assert!(lines[1]["orig_bytes"].is_null());
        assert_eq!(lines[1]["tags"], serde_json::json!([]));
    }
}
