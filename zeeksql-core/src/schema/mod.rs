//! Engine-agnostic schema types.
//!
//! This module turns the `#fields`/`#types` directives of a Zeek log into a
//! schema without depending on a specific SQL engine.
//!
//! # Example
//!
//! ```rust
//! use zeeksql_core::schema::{ColumnDescriptor, DataKind};
//!
//! let column = ColumnDescriptor::new("id.resp_p", "port");
//! assert_eq!(column.kind, DataKind::String);
//! ```

mod field;
mod kind;
mod mapping;

pub use field::{ColumnDescriptor, ResolvedSchema, FILENAME_COLUMN};
pub use kind::DataKind;
pub use mapping::resolve_zeek_type;
