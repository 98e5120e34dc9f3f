//! Export reader
//!
//! Streams raw records out of a SettleUp CSV export. The header line is
//! always skipped and every data line must carry the full set of columns.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::error::{SummaryError, SummaryResult};
use crate::models::{RawRecord, TRANSACTION_COLUMNS};

/// Lazy iterator over the records of an export
///
/// Yields at most one error; iteration ends after it.
pub struct RawRecords<R> {
    reader: Reader<R>,
    record: StringRecord,
    done: bool,
}

impl RawRecords<File> {
    /// Open an export file
    pub fn from_path(path: impl AsRef<Path>) -> SummaryResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SummaryError::Io(format!("Failed to open '{}': {}", path.display(), e))
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> RawRecords<R> {
    /// Read an export from any byte source
    pub fn from_reader(source: R) -> Self {
        // Arity is checked per record so the error can name the line
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        Self {
            reader,
            record: StringRecord::new(),
            done: false,
        }
    }
}

impl<R: Read> RawRecords<R> {
    /// Check if the reader passed over an empty line before the current record
    ///
    /// The csv reader drops empty lines silently. Every record consumes exactly
    /// one line terminator plus the newlines embedded in quoted fields, so any
    /// further newline between `start_line` and the reader's position is blank.
    fn skipped_blank_line(&self, start_line: u64) -> bool {
        let embedded: u64 = self
            .record
            .iter()
            .map(|field| field.matches('\n').count() as u64)
            .sum();
        let consumed = self.reader.position().line().saturating_sub(start_line);
        consumed > embedded + 1
    }
}

impl<R: Read> Iterator for RawRecords<R> {
    type Item = SummaryResult<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                let line = self.record.position().map(|p| p.line()).unwrap_or(0);
                let result = if self.skipped_blank_line(line) {
                    Err(SummaryError::malformed_at(
                        line,
                        format!("expected {} fields, found 0", TRANSACTION_COLUMNS.len()),
                    ))
                } else {
                    RawRecord::from_string_record(&self.record, line)
                };
                self.done = result.is_err();
                Some(result)
            }
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}
