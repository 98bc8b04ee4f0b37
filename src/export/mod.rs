//! Serializing tables and bundling them into an archive.
//!
//! - [`TableWriter`]: one [`crate::types::Table`] → one file payload ([`XlsxWriter`], or
//!   [`CsvWriter`] with the `csv` feature)
//! - [`ArchiveBuilder`]: named payloads → one zip archive
//! - [`naming`]: file name sanitization and collision handling

pub mod archive;
#[cfg(feature = "csv")]
pub mod csv;
pub mod naming;
pub mod writer;
pub mod xlsx;

pub use archive::{ArchiveBuilder, ArchiveEntry, DEFAULT_COMPRESSION_LEVEL};
#[cfg(feature = "csv")]
pub use self::csv::CsvWriter;
pub use naming::{archive_file_name, sanitize_filename, CollisionPolicy};
pub use writer::{OutputFormat, TableWriter};
pub use xlsx::{XlsxWriter, DEFAULT_COLUMN_WIDTH};
