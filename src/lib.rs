//! `report-splitter` turns one delivery report spreadsheet into a zip archive holding one
//! workbook per courier.
//!
//! The primary entrypoint is [`pipeline::split_report`] (or [`pipeline::Pipeline`] for custom
//! options). Given the raw bytes of a report and a label, a run:
//!
//! 1. reads the first sheet into a [`types::Table`] of strings
//!    (dates as `YYYY-MM-DD`, blank cells as `""`)
//! 2. keeps rows whose `FinalStatus` is `DELIVERED` (trimmed, case-insensitive)
//! 3. groups them by the trimmed `FleeName` (empty names group under `"undefined"`)
//! 4. removes the `sync time` and `planDeliveryDate` columns
//! 5. writes one `.xlsx` per group and bundles them into `<label>.zip`
//!
//! ## What you can read
//!
//! - **Workbooks** (via calamine): `.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`
//! - **CSV** (requires the Cargo feature `csv`, on by default)
//!
//! The format is sniffed from the payload unless [`pipeline::PipelineOptions::format`] is set.
//!
//! ## Quick example
//!
//! ```no_run
//! use report_splitter::pipeline::split_report;
//!
//! # fn main() -> Result<(), report_splitter::PipelineError> {
//! let payload = std::fs::read("deliveries.xlsx").expect("read report");
//! let out = split_report(&payload, "March")?;
//! println!("{} rows in {} groups -> {}", out.total_rows, out.group_keys.len(), out.archive_name);
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`PipelineError`]; [`PipelineError::kind`] classifies it as one of
//! [`error::ErrorKind`] (`Empty`, `MissingColumn`, `NoMatches`, `Write`, `Archive`, `Unknown`)
//! and [`PipelineError::user_message`] renders it for display. No partial archive is ever
//! returned.
//!
//! ## Modules
//!
//! - [`ingestion`]: payload → [`types::Table`] readers
//! - [`processing`]: filter / partition / project
//! - [`export`]: table writers and the archive builder
//! - [`pipeline`]: orchestration, progress, observers
//! - [`types`]: in-memory table types
//! - [`error`]: error types

pub mod error;
pub mod export;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{ErrorKind, PipelineError, PipelineResult};
