use crate::error::WriteError;
use crate::types::Table;

#[cfg(feature = "csv")]
use super::csv::CsvWriter;
use super::xlsx::XlsxWriter;

/// Serializes one [`Table`] into a standalone file payload.
///
/// The header is taken from the table schema; every row is assumed to share it.
pub trait TableWriter: Send + Sync {
    /// Serialize `table` into a sheet named `sheet`.
    fn write(&self, table: &Table, sheet: &str) -> Result<Vec<u8>, WriteError>;

    /// File extension (without the dot) of the produced payload.
    fn extension(&self) -> &'static str;
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Office Open XML workbook.
    #[default]
    Xlsx,
    /// Comma-separated values (feature-gated behind `csv`).
    #[cfg(feature = "csv")]
    Csv,
}

impl OutputFormat {
    /// Writer implementation for this format.
    ///
    /// `column_width` only applies to formats that carry display widths.
    pub fn writer(self, column_width: f64) -> Box<dyn TableWriter> {
        match self {
            OutputFormat::Xlsx => Box::new(XlsxWriter::with_column_width(column_width)),
            #[cfg(feature = "csv")]
            OutputFormat::Csv => {
                let _ = column_width;
                Box::new(CsvWriter)
            }
        }
    }
}
