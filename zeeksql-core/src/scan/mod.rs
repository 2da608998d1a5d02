//! Scanning: bind once, then pull batches across every matched file.
//!
//! ```text
//! ZeekBinding::bind ──► Arc<ZeekBinding> ──► ZeekScanner::next_batch ──► ColumnSink
//!   (glob, header,                             (Idle → Reading → Done)
//!    schema)
//! ```

mod binding;
mod scanner;

pub use binding::{ScanOptions, ZeekBinding, DEFAULT_BATCH_SIZE};
pub use scanner::{ScanPhase, ZeekScanner};
