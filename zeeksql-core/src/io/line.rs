//! Line reading shared by the header parser and the scanner.

use std::io::{self, BufRead};

/// Reads `\n`-terminated lines from a buffered byte stream.
///
/// A single trailing `\r` is stripped, and a final line without a
/// terminator is still returned. Bytes that are not valid UTF-8 are
/// replaced rather than failing the read.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    lines_read: u64,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a buffered reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(1024),
            lines_read: 0,
        }
    }

    /// Read the next line into `line`, replacing its contents.
    ///
    /// Returns `Ok(false)` at end of stream.
    pub fn read_line(&mut self, line: &mut String) -> io::Result<bool> {
        line.clear();
        self.buf.clear();

        if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }

        match std::str::from_utf8(&self.buf) {
            Ok(text) => line.push_str(text),
            Err(_) => line.push_str(&String::from_utf8_lossy(&self.buf)),
        }
        self.lines_read += 1;
        Ok(true)
    }

    /// Skip up to `count` lines.
    ///
    /// Returns `Ok(false)` if the stream ended first.
    pub fn skip_lines(&mut self, count: usize) -> io::Result<bool> {
        let mut scratch = String::new();
        for _ in 0..count {
            if !self.read_line(&mut scratch)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Number of lines returned so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(data: &[u8]) -> Vec<String> {
        let mut reader = LineReader::new(Cursor::new(data.to_vec()));
        let mut out = Vec::new();
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() {
            out.push(line.clone());
        }
        out
    }

    #[test]
    fn test_splits_on_newline() {
        assert_eq!(lines(b"a\nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_strips_carriage_return() {
        assert_eq!(lines(b"a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_unterminated_final_line() {
        assert_eq!(lines(b"a\nlast"), vec!["a", "last"]);
    }

    #[test]
    fn test_empty_lines_are_returned() {
        assert_eq!(lines(b"a\n\nb\n"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        assert_eq!(lines(b"a\xffb\n"), vec!["a\u{fffd}b"]);
    }

    #[test]
    fn test_skip_lines() {
        let mut reader = LineReader::new(Cursor::new(b"1\n2\n3\n".to_vec()));
        assert!(reader.skip_lines(2).unwrap());
        let mut line = String::new();
        assert!(reader.read_line(&mut line).unwrap());
        assert_eq!(line, "3");
        assert_eq!(reader.lines_read(), 3);
        assert!(!reader.skip_lines(1).unwrap());
    }
}
