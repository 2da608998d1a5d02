//! Virtual table implementations for DuckDB.
//!
//! ## Available Table Functions
//!
//! - `read_zeek(pattern, filename := false)` - Read every Zeek log matching a glob pattern
//! - `zeek_schema(pattern)` - Show the columns `read_zeek` would produce
//!
//! ## Example Usage
//!
//! ```sql
//! SELECT "id.orig_h", count(*) AS connections
//! FROM read_zeek('logs/conn.*.log.gz')
//! GROUP BY 1
//! ORDER BY 2 DESC;
//!
//! SELECT * FROM zeek_schema('logs/dns.log');
//! ```

mod batch_builder;
mod read_zeek;
mod schema;

pub use read_zeek::{register as register_read_zeek, ReadZeekVTab};
pub use schema::{register as register_zeek_schema, ZeekSchemaVTab};
