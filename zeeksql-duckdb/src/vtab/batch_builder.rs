//! Build DuckDB DataChunks from decoded Zeek rows.
//!
//! Scalar columns are written straight into their flat vectors. List columns
//! are buffered for the whole batch, because DuckDB wants the child vector
//! sized and filled in one pass, and are flushed in `finish_batch`.

use std::ffi::CString;

use duckdb::core::{DataChunkHandle, FlatVector, Inserter, ListVector};
use tracing::debug;
use zeeksql_core::{ColumnSink, DataKind, FieldValue, OwnedFieldValue, ResolvedSchema};

/// Entries available in a nested list vector.
///
/// duckdb-rs sizes the entry buffer of a list vector obtained through
/// `list_child()` to one standard vector, whatever was reserved.
const NESTED_LIST_CAPACITY: usize = 2048;

/// Insert a FieldValue into a DuckDB vector at the given row index.
pub fn insert_field_value(vector: &mut FlatVector, row_idx: usize, value: &FieldValue<'_>) {
    match value {
        FieldValue::Null => {
            vector.set_null(row_idx);
        }
        FieldValue::Bool(v) => {
            let slice = vector.as_mut_slice::<bool>();
            slice[row_idx] = *v;
        }
        FieldValue::UInt64(v) => {
            let slice = vector.as_mut_slice::<u64>();
            slice[row_idx] = *v;
        }
        FieldValue::Int64(v) | FieldValue::Timestamp(v) => {
            let slice = vector.as_mut_slice::<i64>();
            slice[row_idx] = *v;
        }
        FieldValue::Float64(v) => {
            let slice = vector.as_mut_slice::<f64>();
            slice[row_idx] = *v;
        }
        FieldValue::Str(v) => insert_string(vector, row_idx, v),
        FieldValue::OwnedString(v) => insert_string(vector, row_idx, v.as_str()),
        // Lists never land in a flat vector
        FieldValue::List(_) => {
            vector.set_null(row_idx);
        }
    }
}

/// Insert a string value.
#[inline]
pub fn insert_string(vector: &mut FlatVector, row_idx: usize, value: &str) {
    if let Ok(cstr) = CString::new(value) {
        vector.insert(row_idx, cstr);
    } else {
        // String contains null byte, set as null
        vector.set_null(row_idx);
    }
}

/// Per-batch buffer for one LIST column.
#[derive(Debug)]
struct ListColumnBuilder {
    inner: DataKind,
    rows: Vec<Option<Vec<OwnedFieldValue>>>,
}

impl ListColumnBuilder {
    fn new(inner: DataKind) -> Self {
        Self {
            inner,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: usize, value: FieldValue<'_>) {
        if self.rows.len() <= row {
            self.rows.resize(row + 1, None);
        }
        self.rows[row] = match value {
            FieldValue::List(items) => Some(items.into_iter().map(FieldValue::into_owned).collect()),
            _ => None,
        };
    }

    fn write_to_list_vector(&mut self, vector: &mut ListVector, rows: usize) {
        self.rows.resize(rows, None);
        let mut lists: Vec<Option<&[OwnedFieldValue]>> =
            self.rows.iter().map(|row| row.as_deref()).collect();
        write_lists(vector, &self.inner, &mut lists);
        self.rows.clear();
    }
}

/// Write `lists[i]` as entry `i` of `vector`; `None` is a NULL list.
fn write_lists(vector: &mut ListVector, inner: &DataKind, lists: &mut [Option<&[OwnedFieldValue]>]) {
    if matches!(inner, DataKind::List(_)) {
        let dropped = cap_nested_entries(lists, NESTED_LIST_CAPACITY);
        if dropped > 0 {
            debug!(dropped, "nested list entries exceed vector capacity, writing NULL");
        }
    }

    let mut offset = 0;
    for (idx, list) in lists.iter().enumerate() {
        let len = list.map_or(0, <[_]>::len);
        vector.set_entry(idx, offset, len);
        if list.is_none() {
            vector.set_null(idx);
        }
        offset += len;
    }
    let total = offset;

    let elements: Vec<&OwnedFieldValue> = lists.iter().flatten().flat_map(|items| items.iter()).collect();

    match inner {
        DataKind::List(grand_inner) => {
            // Reserve the child, then address it as a list
            let _ = vector.child(total);
            let mut child = vector.list_child();
            let mut nested: Vec<Option<&[OwnedFieldValue]>> =
                elements.iter().map(|value| value.as_list()).collect();
            write_lists(&mut child, grand_inner, &mut nested);
        }
        _ => {
            let mut child = vector.child(total);
            for (idx, value) in elements.iter().enumerate() {
                insert_field_value(&mut child, idx, value);
            }
        }
    }

    vector.set_len(total);
}

/// Replace lists with NULL once their combined element count would exceed
/// `capacity`. Returns how many were replaced.
fn cap_nested_entries(lists: &mut [Option<&[OwnedFieldValue]>], capacity: usize) -> usize {
    let mut used = 0;
    let mut dropped = 0;
    for list in lists.iter_mut() {
        let Some(items) = list else { continue };
        if used + items.len() > capacity {
            *list = None;
            dropped += 1;
        } else {
            used += items.len();
        }
    }
    dropped
}

/// [`ColumnSink`] that writes straight into a DuckDB output chunk.
pub struct ChunkWriter<'a> {
    output: &'a mut DataChunkHandle,
    lists: Vec<Option<ListColumnBuilder>>,
}

impl<'a> ChunkWriter<'a> {
    pub fn new(output: &'a mut DataChunkHandle, schema: &ResolvedSchema) -> Self {
        let lists = schema
            .output_columns()
            .map(|(_, kind)| kind.list_inner().cloned().map(ListColumnBuilder::new))
            .collect();
        Self { output, lists }
    }
}

impl ColumnSink for ChunkWriter<'_> {
    fn write_value(&mut self, column: usize, row: usize, value: FieldValue<'_>) {
        match self.lists.get_mut(column) {
            Some(Some(builder)) => builder.push(row, value),
            _ => {
                let mut vector = self.output.flat_vector(column);
                insert_field_value(&mut vector, row, &value);
            }
        }
    }

    fn finish_batch(&mut self, rows: usize) {
        for (column, builder) in self.lists.iter_mut().enumerate() {
            if let Some(builder) = builder {
                let mut vector = self.output.list_vector(column);
                builder.write_to_list_vector(&mut vector, rows);
            }
        }
        self.output.set_len(rows);
    }
}
