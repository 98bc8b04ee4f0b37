//! Reading a report payload into a [`crate::types::Table`].
//!
//! Every reader implements [`TableReader`]. Most callers use [`AutoReader`], which:
//!
//! - sniffs the payload (zip/OLE container => workbook, otherwise CSV)
//! - reads the first sheet only
//! - normalizes every cell to a string
//!
//! Format-specific readers are also available under:
//! - [`excel`]
//! - [`csv`] (feature `csv`)

#[cfg(feature = "csv")]
pub mod csv;
pub mod excel;
pub mod reader;
pub mod unified;

#[cfg(feature = "csv")]
pub use self::csv::CsvReader;
pub use excel::ExcelReader;
pub use reader::TableReader;
pub use unified::{AutoReader, SourceFormat};
