//! Fuzz target for the Zeek preamble parser and escape decoder.
//!
//! Exercises directive splitting, `\xHH` separator decoding and the
//! fields/types validation on arbitrary text.

#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use zeeksql_core::{decode_escapes, parse_header, LineReader, ResolvedSchema};

fuzz_target!(|data: &[u8]| {
    let mut reader = LineReader::new(Cursor::new(data));
    if let Ok(header) = parse_header(&mut reader) {
        assert_eq!(header.fields.len(), header.types.len());
        assert!(!header.fields.is_empty());

        // Every type name must resolve
        let schema = ResolvedSchema::from_header(&header, true);
        assert_eq!(schema.len(), header.fields.len() + 1);
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let decoded = decode_escapes(text);
        assert!(decoded.chars().count() <= text.chars().count());
    }
});
