//! The multi-file scan cursor.

use std::sync::Arc;

use tracing::debug;

use super::ZeekBinding;
use crate::decode::{decode_row, ColumnSink, FieldValue};
use crate::error::{Error, Result};
use crate::io::{LineReader, LogFileSystem};

/// Observable phase of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// No file is open; the next call opens one (or finishes).
    Idle,
    /// A file is open and positioned on its data lines.
    Reading,
    /// No more rows will be produced.
    Done,
}

struct ActiveFile<R> {
    reader: LineReader<R>,
    path: String,
}

struct ScanState<R> {
    pending_files: Vec<String>,
    file_cursor: usize,
    active: Option<ActiveFile<R>>,
    exhausted: bool,
}

impl<R: std::io::BufRead> ScanState<R> {
    /// Open the next file that has data lines after its preamble.
    ///
    /// Returns `Ok(false)` once every file has been visited.
    fn open_next<F>(&mut self, fs: &F, preamble_lines: usize) -> Result<bool>
    where
        F: LogFileSystem<Reader = R>,
    {
        while let Some(path) = self.pending_files.get(self.file_cursor) {
            self.file_cursor += 1;
            let path = path.clone();

            let mut reader = LineReader::new(fs.open(&path)?);
            let complete = reader
                .skip_lines(preamble_lines)
                .map_err(|e| Error::in_file(path.as_str(), e))?;
            if !complete {
                debug!(path = %path, "file ended inside its preamble");
                continue;
            }

            debug!(path = %path, "reading Zeek log");
            self.active = Some(ActiveFile { reader, path });
            return Ok(true);
        }
        Ok(false)
    }
}

/// Pull-based reader over every file of a [`ZeekBinding`].
///
/// Each call to [`ZeekScanner::next_batch`] fills at most `max_rows` rows.
/// Files are read in sorted order; at most one file handle is open at a
/// time, and it is released on end of file, on error and on drop.
pub struct ZeekScanner<F: LogFileSystem> {
    fs: F,
    binding: Arc<ZeekBinding>,
    state: ScanState<F::Reader>,
    line: String,
}

impl<F: LogFileSystem> ZeekScanner<F> {
    /// Start a scan in the Idle phase.
    pub fn new(fs: F, binding: Arc<ZeekBinding>) -> Self {
        let state = ScanState {
            pending_files: binding.files().to_vec(),
            file_cursor: 0,
            active: None,
            exhausted: false,
        };
        Self {
            fs,
            binding,
            state,
            line: String::new(),
        }
    }

    pub fn binding(&self) -> &Arc<ZeekBinding> {
        &self.binding
    }

    pub fn phase(&self) -> ScanPhase {
        if self.state.exhausted {
            ScanPhase::Done
        } else if self.state.active.is_some() {
            ScanPhase::Reading
        } else {
            ScanPhase::Idle
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state.exhausted
    }

    /// Path of the file currently being read.
    pub fn current_path(&self) -> Option<&str> {
        self.state.active.as_ref().map(|file| file.path.as_str())
    }

    /// Decode up to `max_rows` rows into `sink`.
    ///
    /// Returns the number of rows written; 0 means the scan is done, and
    /// every later call also returns 0. `finish_batch` is called on the sink
    /// in every case.
    ///
    /// # Errors
    ///
    /// Open and read failures are fatal: the open handle is released, the
    /// scan moves to [`ScanPhase::Done`] and the error is returned.
    pub fn next_batch<S: ColumnSink + ?Sized>(
        &mut self,
        sink: &mut S,
        max_rows: usize,
    ) -> Result<usize> {
        if self.state.exhausted {
            sink.finish_batch(0);
            return Ok(0);
        }

        match self.fill(sink, max_rows) {
            Ok(rows) => {
                sink.finish_batch(rows);
                Ok(rows)
            }
            Err(e) => {
                self.state.active = None;
                self.state.exhausted = true;
                sink.finish_batch(0);
                Err(e)
            }
        }
    }

    fn fill<S: ColumnSink + ?Sized>(&mut self, sink: &mut S, max_rows: usize) -> Result<usize> {
        let Self {
            fs,
            binding,
            state,
            line,
        } = self;
        let header = binding.header();
        let schema = binding.schema();
        let filename_column = schema.filename_index();

        let mut rows = 0;
        while rows < max_rows {
            let Some(active) = state.active.as_mut() else {
                if !state.open_next(&*fs, header.preamble_lines)? {
                    debug!("Zeek scan exhausted");
                    state.exhausted = true;
                    break;
                }
                continue;
            };

            let more = active
                .reader
                .read_line(line)
                .map_err(|e| Error::in_file(active.path.as_str(), e))?;
            if !more {
                debug!(path = %active.path, lines = active.reader.lines_read(), "finished Zeek log");
                state.active = None;
                continue;
            }

            // Comments and blank lines may appear anywhere, e.g. #close
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            decode_row(line, header, schema, rows, sink);
            if let Some(column) = filename_column {
                sink.write_value(column, rows, FieldValue::Str(&active.path));
            }
            rows += 1;
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{ColumnBatch, OwnedFieldValue};
    use crate::io::MemoryFileSystem;
    use crate::scan::ScanOptions;

    const HEADER: &str = "#separator \\x09\n#fields\tts\tcount_field\n#types\ttime\tcount\n";

    fn log(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    fn scanner(fs: MemoryFileSystem, options: ScanOptions) -> ZeekScanner<MemoryFileSystem> {
        let binding = ZeekBinding::bind(&fs, &["*.log"], options).unwrap();
        ZeekScanner::new(fs, Arc::new(binding))
    }

    fn drain(scanner: &mut ZeekScanner<MemoryFileSystem>, max_rows: usize) -> Vec<Vec<OwnedFieldValue>> {
        let columns = scanner.binding().schema().len();
        let mut batch = ColumnBatch::new(columns);
        let mut rows = Vec::new();
        loop {
            batch.clear();
            if scanner.next_batch(&mut batch, max_rows).unwrap() == 0 {
                return rows;
            }
            rows.extend(batch.rows());
        }
    }

    #[test]
    fn test_single_file_rows() {
        let fs = MemoryFileSystem::new().with_file("conn.log", log(&["1234567890.5\t42"]));
        let mut scan = scanner(fs, ScanOptions::default());
        assert_eq!(scan.phase(), ScanPhase::Idle);

        let rows = drain(&mut scan, 2048);
        assert_eq!(
            rows,
            vec![vec![
                FieldValue::Timestamp(1_234_567_890_500_000),
                FieldValue::UInt64(42)
            ]]
        );
        assert_eq!(scan.phase(), ScanPhase::Done);
    }

    #[test]
    fn test_files_read_in_sorted_order() {
        let fs = MemoryFileSystem::new()
            .with_file("b.log", log(&["2\t2"]))
            .with_file("a.log", log(&["1\t1"]));
        let mut scan = scanner(fs, ScanOptions::default().with_filename(true));

        let rows = drain(&mut scan, 2048);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], FieldValue::UInt64(1));
        assert_eq!(rows[0][2].as_str(), Some("a.log"));
        assert_eq!(rows[1][1], FieldValue::UInt64(2));
        assert_eq!(rows[1][2].as_str(), Some("b.log"));
    }

    #[test]
    fn test_batches_respect_max_rows() {
        let fs = MemoryFileSystem::new().with_file("x.log", log(&["1\t1", "2\t2", "3\t3"]));
        let mut scan = scanner(fs, ScanOptions::default());
        let mut batch = ColumnBatch::new(2);

        assert_eq!(scan.next_batch(&mut batch, 2).unwrap(), 2);
        assert_eq!(scan.phase(), ScanPhase::Reading);
        assert_eq!(scan.current_path(), Some("x.log"));
        batch.clear();
        assert_eq!(scan.next_batch(&mut batch, 2).unwrap(), 1);
        assert_eq!(batch.column(1), [FieldValue::UInt64(3)]);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let fs = MemoryFileSystem::new().with_file(
            "x.log",
            log(&["1\t1", "", "# mid-stream comment", "2\t2", "#close\t2024-01-01-00-00-00"]),
        );
        let mut scan = scanner(fs, ScanOptions::default());
        assert_eq!(drain(&mut scan, 2048).len(), 2);
    }

    #[test]
    fn test_header_only_file_is_skipped() {
        let fs = MemoryFileSystem::new()
            .with_file("a.log", HEADER)
            .with_file("b.log", log(&["5\t5"]));
        let mut scan = scanner(fs, ScanOptions::default());
        let rows = drain(&mut scan, 2048);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1], FieldValue::UInt64(5));
    }

    #[test]
    fn test_truncated_preamble_in_later_file() {
        let fs = MemoryFileSystem::new()
            .with_file("a.log", log(&["1\t1"]))
            .with_file("b.log", "#separator \\x09\n");
        let mut scan = scanner(fs, ScanOptions::default());
        assert_eq!(drain(&mut scan, 2048).len(), 1);
        assert!(scan.is_finished());
    }

    #[test]
    fn test_done_is_idempotent() {
        let fs = MemoryFileSystem::new().with_file("x.log", log(&["1\t1"]));
        let mut scan = scanner(fs, ScanOptions::default());
        drain(&mut scan, 2048);

        let mut batch = ColumnBatch::new(2);
        for _ in 0..3 {
            assert_eq!(scan.next_batch(&mut batch, 2048).unwrap(), 0);
            assert!(batch.is_empty());
            assert_eq!(scan.phase(), ScanPhase::Done);
        }
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let fs = MemoryFileSystem::new()
            .with_file("a.log", log(&["1\t1"]))
            .with_file("b.log", log(&["2\t2"]));
        let binding = ZeekBinding::bind(&fs, &["*.log"], ScanOptions::default()).unwrap();

        // b.log disappears between bind and scan
        let scan_fs = MemoryFileSystem::new().with_file("a.log", log(&["1\t1"]));
        let mut scan = ZeekScanner::new(scan_fs, Arc::new(binding));
        let mut batch = ColumnBatch::new(2);

        let err = scan.next_batch(&mut batch, 2048).unwrap_err();
        assert_eq!(err.path(), Some("b.log"));
        assert_eq!(scan.phase(), ScanPhase::Done);
        assert_eq!(scan.next_batch(&mut batch, 2048).unwrap(), 0);
    }

    #[test]
    fn test_crlf_lines() {
        let fs = MemoryFileSystem::new().with_file(
            "x.log",
            "#fields\ta\tb\r\n#types\tstring\tcount\r\nx\t7\r\n",
        );
        let mut scan = scanner(fs, ScanOptions::default());
        let rows = drain(&mut scan, 2048);
        assert_eq!(rows[0][0].as_str(), Some("x"));
        assert_eq!(rows[0][1], FieldValue::UInt64(7));
    }
}
