//! Fuzz target for compression detection feeding the line reader.
//!
//! Tests format confusion and truncated streams for every compiled-in
//! codec. Reads are capped so decompression bombs stay cheap.

#![no_main]

use std::io::{BufReader, Cursor, Read};

use libfuzzer_sys::fuzz_target;
use zeeksql_core::io::{Compression, DecompressReader, LineReader};

/// Maximum decompressed bytes consumed per input.
const MAX_DECOMPRESS_SIZE: u64 = 1024 * 1024;

fuzz_target!(|data: &[u8]| {
    let compression = Compression::detect(data);

    let Ok(decoder) = DecompressReader::new(Cursor::new(data), compression) else {
        return;
    };
    let mut lines = LineReader::new(BufReader::new(decoder.take(MAX_DECOMPRESS_SIZE)));

    let mut line = String::new();
    while let Ok(true) = lines.read_line(&mut line) {
        assert!(!line.ends_with('\n'));
    }
});
