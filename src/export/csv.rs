//! CSV export implementation.

use crate::error::WriteError;
use crate::types::Table;

use super::writer::TableWriter;

/// Writes a [`Table`] as CSV (header line first). The sheet name is not representable and is
/// ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl TableWriter for CsvWriter {
    fn write(&self, table: &Table, _sheet: &str) -> Result<Vec<u8>, WriteError> {
        let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());
        wtr.write_record(table.schema.column_names())?;
        for row in &table.rows {
            wtr.write_record(row)?;
        }
        wtr.into_inner()
            .map_err(|e| WriteError::Io(std::io::Error::new(e.error().kind(), e.to_string())))
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::CsvWriter;
    use crate::export::TableWriter;
    use crate::ingestion::{CsvReader, TableReader};
    use crate::types::{Schema, Table};

    #[test]
    fn quotes_fields_that_need_it_and_reads_back() {
        let t = Table::new(
            "Sheet1",
            Schema::new(["FleeName", "note"]),
            vec![vec!["A, Inc".to_string(), "said \"hi\"".to_string()]],
        );
        let bytes = CsvWriter.write(&t, "Sheet1").unwrap();
        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            "FleeName,note\n\"A, Inc\",\"said \"\"hi\"\"\"\n"
        );
        let back = CsvReader::default().read(&bytes, "FleeName").unwrap();
        assert_eq!(back, t);
    }
}
