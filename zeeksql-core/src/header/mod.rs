//! Zeek log header (the `#`-directive preamble).
//!
//! A Zeek TSV log starts with directives describing its own format:
//!
//! ```text
//! #separator \x09
//! #set_separator	,
//! #empty_field	(empty)
//! #unset_field	-
//! #path	conn
//! #open	2024-01-01-00-00-00
//! #fields	ts	uid	id.orig_h	...
//! #types	time	string	addr	...
//! ```
//!
//! [`parse_header`] reads these into a [`ZeekHeader`], which then drives the
//! row decoder for every file of a scan.

mod escape;
mod parser;

pub use escape::decode_escapes;
pub use parser::parse_header;

/// Parsed Zeek log header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeekHeader {
    /// Field separator (default: tab)
    pub field_separator: char,
    /// Set/vector element separator (default: comma)
    pub set_separator: char,
    /// Marker for empty fields (default: "(empty)")
    pub empty_field: String,
    /// Marker for unset fields (default: "-")
    pub unset_field: String,
    /// Log stream identifier (e.g., "conn", "dns")
    pub stream_path: String,
    /// Value of the `#open` directive
    pub opened_at: String,
    /// Column names, in order
    pub fields: Vec<String>,
    /// Zeek type names, parallel to `fields`
    pub types: Vec<String>,
    /// Number of `#` lines in the preamble
    pub preamble_lines: usize,
}

impl Default for ZeekHeader {
    fn default() -> Self {
        Self {
            field_separator: '\t',
            set_separator: ',',
            empty_field: "(empty)".to_string(),
            unset_field: "-".to_string(),
            stream_path: String::new(),
            opened_at: String::new(),
            fields: Vec::new(),
            types: Vec::new(),
            preamble_lines: 0,
        }
    }
}

impl ZeekHeader {
    /// Whether `text` is the unset or the empty sentinel.
    #[inline]
    pub fn is_sentinel(&self, text: &str) -> bool {
        text == self.unset_field || text == self.empty_field
    }

    /// Number of declared columns.
    pub fn column_count(&self) -> usize {
        self.fields.len()
    }
}

/// Split a separated line into its tokens.
///
/// Interior empty tokens are kept, but a single trailing separator does not
/// produce an empty last token: `a\tb\t` splits into `a` and `b`.
pub fn split_tokens(text: &str, separator: char) -> std::str::Split<'_, char> {
    text.strip_suffix(separator).unwrap_or(text).split(separator)
}
