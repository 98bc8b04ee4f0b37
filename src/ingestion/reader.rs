//! The [`TableReader`] seam and the header/row normalization shared by every reader.

use crate::error::ReadError;
use crate::types::{Schema, Table};

/// Parses a raw report payload into an in-memory [`Table`].
///
/// Implementations read the first sheet only, convert every cell to a string, and must enforce
/// two rules via [`finish_table`]:
///
/// - zero data rows => [`ReadError::Empty`]
/// - header without `required_column` => [`ReadError::MissingColumn`]
pub trait TableReader: Send + Sync {
    /// Read `payload`, requiring `required_column` to be present in the header.
    fn read(&self, payload: &[u8], required_column: &str) -> Result<Table, ReadError>;
}

/// Turn raw string rows (header first) into a validated [`Table`].
///
/// - The first row with any non-blank cell is the header.
/// - Header names are kept exactly as written, so `" FleeName "` does not satisfy a
///   `FleeName` requirement.
/// - Blank names become `column_<n>` and duplicates get `_<k>`.
/// - Data rows wider than the header extend it with `column_<n>` names; no cell is dropped.
/// - Rows where every cell is blank are skipped.
pub(crate) fn finish_table<I>(sheet: &str, rows: I, required_column: &str) -> Result<Table, ReadError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut rows = rows.into_iter().filter(|r| !is_blank_row(r));

    let header = rows.next().ok_or(ReadError::Empty)?;

    let data: Vec<Vec<String>> = rows.collect();
    if data.is_empty() {
        return Err(ReadError::Empty);
    }

    let width = data.iter().map(Vec::len).fold(header.len(), usize::max);
    let schema = normalize_header(header, width);
    if !schema.contains(required_column) {
        return Err(ReadError::MissingColumn(required_column.to_string()));
    }

    Ok(Table::new(sheet, schema, data))
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

fn normalize_header(mut cells: Vec<String>, width: usize) -> Schema {
    cells.resize(width, String::new());

    let mut columns: Vec<String> = Vec::with_capacity(width);
    for (idx0, cell) in cells.into_iter().enumerate() {
        let base = if cell.trim().is_empty() {
            format!("column_{}", idx0 + 1)
        } else {
            cell
        };

        let mut name = base.clone();
        let mut k = 1;
        while columns.contains(&name) {
            name = format!("{base}_{k}");
            k += 1;
        }
        columns.push(name);
    }
    Schema { columns }
}
