//! CSV ingestion implementation.

use crate::error::ReadError;
use crate::types::Table;

use super::reader::{finish_table, TableReader};

/// Sheet identifier given to tables read from CSV (which has no sheets).
pub const CSV_SHEET_NAME: &str = "Sheet1";

/// Reads a comma-separated payload as a single sheet.
///
/// Rules:
///
/// - The first non-blank record is the header.
/// - Records may be ragged; missing trailing cells become `""`.
/// - Cell text is kept verbatim (no trimming), matching how workbook strings are read.
#[derive(Debug, Clone, Copy)]
pub struct CsvReader {
    delimiter: u8,
}

impl CsvReader {
    /// Reader using a custom single-byte delimiter (e.g. `b';'`).
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TableReader for CsvReader {
    fn read(&self, payload: &[u8], required_column: &str) -> Result<Table, ReadError> {
        let payload = payload.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(payload);
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(payload);

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        finish_table(CSV_SHEET_NAME, rows, required_column)
    }
}
