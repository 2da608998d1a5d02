//! Destinations for decoded rows.

use super::{FieldValue, OwnedFieldValue};

/// Column-oriented receiver for decoded values.
///
/// The scanner writes each value exactly once per `(column, row)` and then
/// calls [`ColumnSink::finish_batch`] with the number of rows produced.
/// Implementations may be an in-memory buffer or a host engine's output
/// chunk.
pub trait ColumnSink {
    /// Store one value. `value` may borrow from the current line.
    fn write_value(&mut self, column: usize, row: usize, value: FieldValue<'_>);

    /// Called once per batch, after the last row was written.
    fn finish_batch(&mut self, _rows: usize) {}
}

/// In-memory columnar batch of owned values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnBatch {
    columns: Vec<Vec<OwnedFieldValue>>,
    num_rows: usize,
}

impl ColumnBatch {
    /// Create an empty batch with `num_columns` columns.
    pub fn new(num_columns: usize) -> Self {
        Self {
            columns: vec![Vec::new(); num_columns],
            num_rows: 0,
        }
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows reported by the last [`ColumnSink::finish_batch`].
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    /// Values of one column, truncated to the batch length.
    pub fn column(&self, index: usize) -> &[OwnedFieldValue] {
        let column = &self.columns[index];
        &column[..self.num_rows.min(column.len())]
    }

    /// Copy out one row across all columns.
    pub fn row(&self, index: usize) -> Vec<OwnedFieldValue> {
        self.columns
            .iter()
            .map(|column| column.get(index).cloned().unwrap_or(FieldValue::Null))
            .collect()
    }

    /// Iterate over rows, each as a freshly collected vector.
    pub fn rows(&self) -> impl Iterator<Item = Vec<OwnedFieldValue>> + '_ {
        (0..self.num_rows).map(|index| self.row(index))
    }

    /// Drop all values but keep the column allocations.
    pub fn clear(&mut self) {
        for column in &mut self.columns {
            column.clear();
        }
        self.num_rows = 0;
    }
}

impl ColumnSink for ColumnBatch {
    fn write_value(&mut self, column: usize, row: usize, value: FieldValue<'_>) {
        let values = &mut self.columns[column];
        if values.len() <= row {
            values.resize(row + 1, FieldValue::Null);
        }
        values[row] = value.into_owned();
    }

    fn finish_batch(&mut self, rows: usize) {
        self.num_rows = rows;
        for column in &mut self.columns {
            column.resize(rows, FieldValue::Null);
        }
    }
}
