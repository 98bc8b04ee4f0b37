//! In-memory table transformations.
//!
//! The processing layer operates on [`crate::types::Table`] values produced by ingestion:
//!
//! - [`filter_by_status()`]: keep rows whose status cell matches (trimmed, case-insensitive)
//! - [`partition()`]: bucket rows by a trimmed key, in first-seen order
//! - [`project()`]: drop excluded columns before export
//!
//! ## Example: filter → partition → project
//!
//! ```rust
//! use report_splitter::processing::{filter_by_status, partition, project, DEFAULT_EXCLUDED_COLUMNS};
//! use report_splitter::types::{Schema, Table};
//!
//! let table = Table::new(
//!     "Sheet1",
//!     Schema::new(["FleeName", "FinalStatus", "sync time"]),
//!     vec![
//!         vec!["CourierX".into(), "Delivered".into(), "08:00".into()],
//!         vec!["CourierY".into(), "IN_TRANSIT".into(), "08:05".into()],
//!         vec![" CourierX ".into(), "DELIVERED".into(), "09:00".into()],
//!     ],
//! );
//!
//! let delivered = filter_by_status(&table, "FinalStatus", "DELIVERED");
//! let groups = partition(&delivered, "FleeName");
//! assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["CourierX"]);
//!
//! let export = project(&groups.get("CourierX").unwrap().table, &DEFAULT_EXCLUDED_COLUMNS);
//! assert_eq!(export.schema.columns, vec!["FleeName", "FinalStatus"]);
//! assert_eq!(export.row_count(), 2);
//! ```

pub mod filter;
pub mod group;
pub mod project;

pub use filter::{filter, filter_by_status, status_matches};
pub use group::{group_key, partition, Group, Partition, UNDEFINED_GROUP_KEY};
pub use project::{project, DEFAULT_EXCLUDED_COLUMNS};
