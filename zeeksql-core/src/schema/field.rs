//! Column descriptors and the resolved output schema.

use super::{resolve_zeek_type, DataKind};
use crate::header::ZeekHeader;

/// Name of the synthetic provenance column.
pub const FILENAME_COLUMN: &str = "filename";

/// One Zeek column: its name, declared Zeek type and logical type.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Column name from `#fields` (e.g., "id.orig_h")
    pub name: String,

    /// Type name from `#types` (e.g., "set[string]")
    pub zeek_type: String,

    /// Resolved logical type
    pub kind: DataKind,
}

impl ColumnDescriptor {
    /// Create a descriptor, resolving the Zeek type name.
    pub fn new(name: impl Into<String>, zeek_type: impl Into<String>) -> Self {
        let zeek_type = zeek_type.into();
        Self {
            name: name.into(),
            kind: resolve_zeek_type(&zeek_type),
            zeek_type,
        }
    }
}

/// The output schema of a scan.
///
/// Holds the Zeek columns in header order, plus an optional trailing
/// `filename` column carrying each row's source path.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    columns: Vec<ColumnDescriptor>,
    filename_column: bool,
}

impl ResolvedSchema {
    /// Build the schema from a parsed header.
    pub fn from_header(header: &ZeekHeader, filename_column: bool) -> Self {
        let columns = header
            .fields
            .iter()
            .zip(&header.types)
            .map(|(name, zeek_type)| ColumnDescriptor::new(name.as_str(), zeek_type.as_str()))
            .collect();
        Self {
            columns,
            filename_column,
        }
    }

    /// Columns decoded from the log lines.
    pub fn zeek_columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Index of the provenance column, when enabled.
    pub fn filename_index(&self) -> Option<usize> {
        self.filename_column.then_some(self.columns.len())
    }

    /// Total number of output columns.
    pub fn len(&self) -> usize {
        self.columns.len() + usize::from(self.filename_column)
    }

    /// Whether the schema has no columns at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(name, kind)` for every output column, provenance column included.
    pub fn output_columns(&self) -> impl Iterator<Item = (&str, &DataKind)> + '_ {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), &c.kind))
            .chain(
                self.filename_column
                    .then_some((FILENAME_COLUMN, &DataKind::String)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> ZeekHeader {
        ZeekHeader {
            fields: vec!["ts".into(), "uid".into(), "tags".into()],
            types: vec!["time".into(), "string".into(), "set[enum]".into()],
            ..ZeekHeader::default()
        }
    }

    #[test]
    fn test_descriptor_resolves_type() {
        let column = ColumnDescriptor::new("duration", "interval");
        assert_eq!(column.kind, DataKind::Float64);
        assert_eq!(column.zeek_type, "interval");
    }

    #[test]
    fn test_schema_without_filename() {
        let schema = ResolvedSchema::from_header(&header(), false);
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.filename_index(), None);
        assert_eq!(
            schema.zeek_columns()[2].kind,
            DataKind::list(DataKind::String)
        );
    }

    #[test]
    fn test_schema_with_filename() {
        let schema = ResolvedSchema::from_header(&header(), true);
        assert_eq!(schema.len(), 4);
        assert_eq!(schema.filename_index(), Some(3));

        let names: Vec<&str> = schema.output_columns().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["ts", "uid", "tags", "filename"]);
    }
}
