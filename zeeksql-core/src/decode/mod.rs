//! Row decoding: delimited text to typed column values.
//!
//! Decoding never fails for a row as a whole. A field that cannot be
//! converted to its declared type becomes NULL, missing trailing fields
//! become NULL, and extra trailing fields are ignored.
//!
//! Scalar columns and list elements go through the same [`decode_field`],
//! which recurses on [`DataKind::List`].

mod sink;
mod timestamp;
mod value;

pub use sink::{ColumnBatch, ColumnSink};
pub use timestamp::parse_epoch_micros;
pub use value::{FieldValue, OwnedFieldValue};

use crate::header::{split_tokens, ZeekHeader};
use crate::schema::{DataKind, ResolvedSchema};

/// Decode one data line into row `row` of `sink`.
///
/// Only the Zeek columns are written; the provenance column, if any, is the
/// caller's responsibility.
pub fn decode_row<S: ColumnSink + ?Sized>(
    line: &str,
    header: &ZeekHeader,
    schema: &ResolvedSchema,
    row: usize,
    sink: &mut S,
) {
    let mut fields = split_tokens(line, header.field_separator);

    for (column, descriptor) in schema.zeek_columns().iter().enumerate() {
        let value = match fields.next() {
            Some(text) => decode_field(text, &descriptor.kind, header),
            None => FieldValue::Null,
        };
        sink.write_value(column, row, value);
    }
}

/// Decode a single field of the given kind.
///
/// - a scalar equal to either sentinel is NULL
/// - a list equal to either sentinel is an empty list
/// - list elements equal to a sentinel are NULL entries
pub fn decode_field<'a>(text: &'a str, kind: &DataKind, header: &ZeekHeader) -> FieldValue<'a> {
    match kind {
        DataKind::List(inner) => {
            if header.is_sentinel(text) {
                return FieldValue::List(Vec::new());
            }
            let items = text
                .split(header.set_separator)
                .map(|item| {
                    if header.is_sentinel(item) {
                        FieldValue::Null
                    } else {
                        decode_field(item, inner, header)
                    }
                })
                .collect();
            FieldValue::List(items)
        }
        _ if header.is_sentinel(text) => FieldValue::Null,
        scalar => decode_scalar(text, scalar),
    }
}

fn decode_scalar<'a>(text: &'a str, kind: &DataKind) -> FieldValue<'a> {
    let value = match kind {
        DataKind::UInt64 => text.parse().ok().map(FieldValue::UInt64),
        DataKind::Int64 => text.parse().ok().map(FieldValue::Int64),
        DataKind::Float64 => text.parse().ok().map(FieldValue::Float64),
        DataKind::Bool => Some(FieldValue::Bool(text == "T" || text == "true")),
        DataKind::TimestampMicros => parse_epoch_micros(text).map(FieldValue::Timestamp),
        DataKind::String | DataKind::List(_) => Some(FieldValue::Str(text)),
    };
    value.unwrap_or(FieldValue::Null)
}
