//! Engine-agnostic data type definitions.

/// Logical column types produced by the reader.
///
/// The DuckDB extension maps each one to a `LogicalTypeId`; see
/// [`DataKind::sql_type_name`] for the SQL spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Boolean (true/false)
    Bool,

    /// Unsigned 64-bit integer (Zeek `count`)
    UInt64,

    /// Signed 64-bit integer (Zeek `int`)
    Int64,

    /// 64-bit floating point (Zeek `double`, `interval`)
    Float64,

    /// UTF-8 string
    String,

    /// Timestamp with microsecond precision, UTC (Zeek `time`)
    TimestampMicros,

    /// Variable-length list of elements of the same type
    List(Box<DataKind>),
}

impl DataKind {
    /// Shorthand for `DataKind::List(Box::new(inner))`.
    pub fn list(inner: DataKind) -> Self {
        DataKind::List(Box::new(inner))
    }

    /// Human-readable type name for display.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataKind::Bool => "bool",
            DataKind::UInt64 => "u64",
            DataKind::Int64 => "i64",
            DataKind::Float64 => "f64",
            DataKind::String => "string",
            DataKind::TimestampMicros => "timestamp",
            DataKind::List(_) => "list",
        }
    }

    /// SQL spelling of the type, as DuckDB prints it.
    pub fn sql_type_name(&self) -> String {
        match self {
            DataKind::Bool => "BOOLEAN".to_string(),
            DataKind::UInt64 => "UBIGINT".to_string(),
            DataKind::Int64 => "BIGINT".to_string(),
            DataKind::Float64 => "DOUBLE".to_string(),
            DataKind::String => "VARCHAR".to_string(),
            DataKind::TimestampMicros => "TIMESTAMP WITH TIME ZONE".to_string(),
            DataKind::List(inner) => format!("{}[]", inner.sql_type_name()),
        }
    }

    /// Get the inner type for List, or None if not a List.
    pub fn list_inner(&self) -> Option<&DataKind> {
        match self {
            DataKind::List(inner) => Some(inner),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataKind::List(inner) => write!(f, "list<{inner}>"),
            _ => write!(f, "{}", self.type_name()),
        }
    }
}
