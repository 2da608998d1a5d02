//! Zeek type names to [`DataKind`].
//!
//! The mapping is total: type names this reader does not know about are
//! exposed as strings, so logs written by newer Zeek versions still load.

use super::DataKind;

/// Container type prefixes whose element type is given in brackets.
const CONTAINER_PREFIXES: [&str; 2] = ["vector[", "set["];

/// Resolve a Zeek type name (as found in `#types`) to a logical type.
///
/// ```
/// use zeeksql_core::schema::{resolve_zeek_type, DataKind};
///
/// assert_eq!(resolve_zeek_type("count"), DataKind::UInt64);
/// assert_eq!(resolve_zeek_type("set[addr]"), DataKind::list(DataKind::String));
/// ```
pub fn resolve_zeek_type(zeek_type: &str) -> DataKind {
    match zeek_type {
        "time" => DataKind::TimestampMicros,
        "interval" | "double" => DataKind::Float64,
        "count" => DataKind::UInt64,
        "int" => DataKind::Int64,
        "bool" => DataKind::Bool,
        "string" | "addr" | "subnet" | "port" | "enum" => DataKind::String,
        _ if CONTAINER_PREFIXES.iter().any(|p| zeek_type.starts_with(p)) => {
            DataKind::list(resolve_zeek_type(element_type(zeek_type)))
        }
        _ => DataKind::String,
    }
}

/// Text strictly between the first `[` and the last `]`.
///
/// Falls back to `string` when the brackets are malformed.
fn element_type(zeek_type: &str) -> &str {
    match (zeek_type.find('['), zeek_type.rfind(']')) {
        (Some(start), Some(end)) if end > start => &zeek_type[start + 1..end],
        _ => "string",
    }
}
