//! Fuzz target for a full in-memory scan.
//!
//! The input is used as a whole log file; any header that binds must scan
//! to completion without panicking, and the scan must end in Done.

#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use zeeksql_core::{ColumnBatch, MemoryFileSystem, ScanOptions, ScanPhase, ZeekBinding, ZeekScanner};

fuzz_target!(|data: &[u8]| {
    let fs = MemoryFileSystem::new()
        .with_file("a.log", data.to_vec())
        .with_file("b.log", data.to_vec());
    let options = ScanOptions::default().with_filename(true).with_batch_size(64);

    let Ok(binding) = ZeekBinding::bind(&fs, &["*.log"], options) else {
        return;
    };
    let binding = Arc::new(binding);
    let mut scanner = ZeekScanner::new(fs, Arc::clone(&binding));
    let mut batch = ColumnBatch::new(binding.schema().len());

    while let Ok(rows) = scanner.next_batch(&mut batch, options.batch_size) {
        assert!(rows <= options.batch_size);
        if rows == 0 {
            break;
        }
        batch.clear();
    }
    assert_eq!(scanner.phase(), ScanPhase::Done);
});
