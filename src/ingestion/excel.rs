use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;

use crate::error::ReadError;
use crate::types::Table;

use super::reader::{finish_table, TableReader};

/// Reads the first sheet of a workbook (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).
///
/// Behavior:
/// - Uses the first sheet in workbook order; other sheets are ignored
/// - Detects the first non-empty row as the header row
/// - Converts every cell to a string (dates as `YYYY-MM-DD`, times of day as `HH:MM:SS`,
///   blanks as `""`)
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelReader;

impl TableReader for ExcelReader {
    fn read(&self, payload: &[u8], required_column: &str) -> Result<Table, ReadError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(payload))?;

        let sheet = match workbook.sheet_names().first() {
            Some(name) => name.clone(),
            None => return Err(ReadError::Empty),
        };
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => return Err(ReadError::Empty),
        };

        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>());
        finish_table(&sheet, rows, required_column)
    }
}

/// Normalize a single cell to its string form.
pub(crate) fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_to_string(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                return float_to_string(dt.as_f64());
            }
            match dt.as_datetime() {
                // Serial values below one day carry a time of day only.
                Some(ndt) if (0.0..1.0).contains(&dt.as_f64()) => ndt.format("%H:%M:%S").to_string(),
                Some(ndt) => ndt.format("%Y-%m-%d").to_string(),
                None => float_to_string(dt.as_f64()),
            }
        }
        Data::DateTimeIso(s) => iso_date_prefix(s).unwrap_or_else(|| s.clone()),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
    }
}

fn float_to_string(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

fn iso_date_prefix(s: &str) -> Option<String> {
    let prefix = s.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}
