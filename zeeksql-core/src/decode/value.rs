//! Decoded field values.
//!
//! Text values borrow from the line being decoded (`Str`) until they have to
//! outlive it, at which point [`FieldValue::into_owned`] copies them into a
//! `CompactString`.

use compact_str::CompactString;

/// A decoded Zeek field.
///
/// The lifetime parameter `'data` ties borrowed text to the source line.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'data> {
    /// Boolean value
    Bool(bool),
    /// Unsigned 64-bit integer
    UInt64(u64),
    /// Signed 64-bit integer
    Int64(i64),
    /// 64-bit floating point
    Float64(f64),
    /// Microseconds since the Unix epoch, UTC
    Timestamp(i64),

    /// Zero-copy reference into the source line.
    Str(&'data str),
    /// Owned string, used once the line buffer is reused.
    OwnedString(CompactString),

    /// List of values (Zeek `vector` and `set`).
    /// All elements share one type; NULL entries are allowed.
    List(Vec<FieldValue<'data>>),

    /// Null/missing value
    Null,
}

/// Type alias for FieldValue that owns all its data.
pub type OwnedFieldValue = FieldValue<'static>;

impl<'data> FieldValue<'data> {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Detach the value from the line it was decoded from.
    pub fn into_owned(self) -> OwnedFieldValue {
        match self {
            FieldValue::Bool(v) => FieldValue::Bool(v),
            FieldValue::UInt64(v) => FieldValue::UInt64(v),
            FieldValue::Int64(v) => FieldValue::Int64(v),
            FieldValue::Float64(v) => FieldValue::Float64(v),
            FieldValue::Timestamp(v) => FieldValue::Timestamp(v),
            FieldValue::Str(s) => FieldValue::OwnedString(CompactString::from(s)),
            FieldValue::OwnedString(s) => FieldValue::OwnedString(s),
            FieldValue::List(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::into_owned).collect())
            }
            FieldValue::Null => FieldValue::Null,
        }
    }

    /// Try to get as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            FieldValue::OwnedString(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get as u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int64(v) | FieldValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the list items.
    pub fn as_list(&self) -> Option<&[FieldValue<'data>]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_owned_keeps_text() {
        let line = String::from("Cabc123");
        let owned = FieldValue::Str(&line).into_owned();
        drop(line);
        assert_eq!(owned.as_str(), Some("Cabc123"));
        assert!(matches!(owned, FieldValue::OwnedString(_)));
    }

    #[test]
    fn test_into_owned_nested_list() {
        let value = FieldValue::List(vec![
            FieldValue::Str("a"),
            FieldValue::Null,
            FieldValue::List(vec![FieldValue::UInt64(1)]),
        ]);
        let owned = value.into_owned();
        let items = owned.as_list().unwrap();
        assert_eq!(items[0].as_str(), Some("a"));
        assert!(items[1].is_null());
        assert_eq!(items[2].as_list().unwrap()[0].as_u64(), Some(1));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(FieldValue::Bool(true).as_bool(), Some(true));
        assert_eq!(FieldValue::Int64(-3).as_i64(), Some(-3));
        assert_eq!(FieldValue::Timestamp(7).as_i64(), Some(7));
        assert_eq!(FieldValue::Float64(0.5).as_f64(), Some(0.5));
        assert_eq!(FieldValue::UInt64(1).as_str(), None);
    }
}
