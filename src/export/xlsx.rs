use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook};

use crate::error::WriteError;
use crate::types::Table;

use super::writer::TableWriter;

/// Display width (in characters) applied to every output column.
pub const DEFAULT_COLUMN_WIDTH: f64 = 20.0;

/// Writes a [`Table`] as a single-sheet `.xlsx` workbook.
///
/// Behavior:
/// - Row 0 holds the column names, data starts at row 1
/// - Every cell is written as a string; empty strings are left blank
/// - Every column gets the same display width
/// - The document creation time is pinned, so equal input gives equal bytes
#[derive(Debug, Clone, Copy)]
pub struct XlsxWriter {
    column_width: f64,
}

impl XlsxWriter {
    /// Writer applying `column_width` to every column.
    pub fn with_column_width(column_width: f64) -> Self {
        Self { column_width }
    }
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl TableWriter for XlsxWriter {
    fn write(&self, table: &Table, sheet: &str) -> Result<Vec<u8>, WriteError> {
        let mut wb = Workbook::new();
        let properties = DocProperties::new().set_creation_datetime(&ExcelDateTime::from_ymd(2000, 1, 1)?);
        wb.set_properties(&properties);

        let ws = wb.add_worksheet();
        ws.set_name(sheet)?;

        for (col, name) in table.schema.column_names().enumerate() {
            let col = col_num(col)?;
            ws.set_column_width(col, self.column_width)?;
            ws.write_string(0, col, name)?;
        }

        for (idx0, row) in table.rows.iter().enumerate() {
            let row_num = row_num(idx0 + 1)?;
            for (col, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                ws.write_string(row_num, col_num(col)?, value)?;
            }
        }

        Ok(wb.save_to_buffer()?)
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }
}

fn row_num(idx: usize) -> Result<u32, WriteError> {
    u32::try_from(idx).map_err(|_| rust_xlsxwriter::XlsxError::RowColumnLimitError.into())
}

fn col_num(idx: usize) -> Result<u16, WriteError> {
    u16::try_from(idx).map_err(|_| rust_xlsxwriter::XlsxError::RowColumnLimitError.into())
}
