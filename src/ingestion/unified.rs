//! Format detection and the [`AutoReader`] that dispatches to the right [`TableReader`].
//!
//! - If a [`SourceFormat`] is known (from a file extension, say), use [`SourceFormat::reader`].
//! - Otherwise [`AutoReader`] sniffs the payload signature: zip and OLE containers are
//!   workbooks, anything else is treated as CSV (when the `csv` feature is enabled).

use crate::error::ReadError;
use crate::types::Table;

use super::excel::ExcelReader;
use super::reader::TableReader;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Spreadsheet/workbook formats read through calamine.
    Excel,
    /// Comma-separated values (feature-gated behind `csv`).
    Csv,
}

impl SourceFormat {
    /// Parse a source format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Guess the format from the payload's leading bytes.
    pub fn sniff(payload: &[u8]) -> Self {
        if payload.starts_with(ZIP_MAGIC) || payload.starts_with(OLE_MAGIC) {
            Self::Excel
        } else {
            Self::Csv
        }
    }

    /// Reader implementation for this format.
    pub fn reader(self) -> Box<dyn TableReader> {
        match self {
            Self::Excel => Box::new(ExcelReader),
            Self::Csv => csv_reader(),
        }
    }
}

#[cfg(feature = "csv")]
fn csv_reader() -> Box<dyn TableReader> {
    Box::new(super::csv::CsvReader::default())
}

#[cfg(not(feature = "csv"))]
fn csv_reader() -> Box<dyn TableReader> {
    // Without CSV support, let calamine report the payload as unreadable.
    Box::new(ExcelReader)
}

/// Reader that picks [`SourceFormat`] by sniffing each payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoReader;

impl TableReader for AutoReader {
    fn read(&self, payload: &[u8], required_column: &str) -> Result<Table, ReadError> {
        SourceFormat::sniff(payload)
            .reader()
            .read(payload, required_column)
    }
}

#[cfg(test)]
mod tests {
    use super::SourceFormat;

    #[test]
    fn extensions_are_case_insensitive() {
        assert_eq!(SourceFormat::from_extension("XLSX"), Some(SourceFormat::Excel));
        assert_eq!(SourceFormat::from_extension("ods"), Some(SourceFormat::Excel));
        assert_eq!(SourceFormat::from_extension("Csv"), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_extension("txt"), None);
    }

    #[test]
    fn sniff_recognizes_containers() {
        assert_eq!(SourceFormat::sniff(b"PK\x03\x04rest"), SourceFormat::Excel);
        assert_eq!(
            SourceFormat::sniff(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0]),
            SourceFormat::Excel
        );
        assert_eq!(SourceFormat::sniff(b"FleeName,FinalStatus\n"), SourceFormat::Csv);
    }
}
