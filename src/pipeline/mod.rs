//! The end-to-end split pipeline: read → filter → group → project → write → archive.
//!
//! Most callers use [`split_report`] or build a [`Pipeline`] from [`PipelineOptions`]. A run:
//!
//! - reads the first sheet of the payload (format sniffed unless [`PipelineOptions::format`] is set)
//! - keeps rows whose status column matches, trimmed and case-insensitively
//! - groups rows by the trimmed grouping column, in first-seen order
//! - drops the excluded columns and writes one table per group
//! - bundles the tables into a zip archive named after the label
//!
//! Progress and outcomes are reported to an optional [`PipelineObserver`]; failures at or above
//! [`PipelineOptions::alert_at_or_above`] also trigger `on_alert`.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use report_splitter::pipeline::{Pipeline, PipelineOptions, StdErrObserver};
//!
//! # fn main() -> Result<(), report_splitter::PipelineError> {
//! let payload = std::fs::read("report.xlsx").expect("read report");
//! let pipeline = Pipeline::new(PipelineOptions {
//!     observer: Some(Arc::new(StdErrObserver)),
//!     ..Default::default()
//! });
//! let out = pipeline.run(&payload, "March deliveries")?;
//! std::fs::write(&out.archive_name, &out.archive).expect("write archive");
//! println!("rows={} groups={:?}", out.total_rows, out.group_keys);
//! # Ok(())
//! # }
//! ```

mod observer;
mod progress;
mod state;
mod summary;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{ArchiveError, PipelineError, PipelineResult, ReadError, WriteError};
use crate::export::{archive_file_name, ArchiveBuilder, CollisionPolicy, OutputFormat, TableWriter};
use crate::export::{DEFAULT_COLUMN_WIDTH, DEFAULT_COMPRESSION_LEVEL};
use crate::ingestion::{AutoReader, SourceFormat, TableReader};
use crate::processing::{filter_by_status, partition, project, DEFAULT_EXCLUDED_COLUMNS};

pub use observer::{
    CompositeObserver, FileObserver, PipelineObserver, ProgressEvent, ProgressLog, RunContext, RunStats,
    Severity, StdErrObserver,
};
pub use progress::exporting_percent;
pub use state::PipelineState;
pub use summary::{GroupSummary, RunSummary};

/// Column holding the delivery status.
pub const DEFAULT_STATUS_COLUMN: &str = "FinalStatus";
/// Status value a row must carry to be exported.
pub const DEFAULT_WANTED_STATUS: &str = "DELIVERED";
/// Column whose trimmed value names each group.
pub const DEFAULT_GROUP_COLUMN: &str = "FleeName";

/// Options controlling a pipeline run.
///
/// Use [`Default`] for the standard delivery report layout.
#[derive(Clone)]
pub struct PipelineOptions {
    /// If `None`, the source format is sniffed from the payload.
    pub format: Option<SourceFormat>,
    /// Column compared against [`Self::wanted_status`].
    pub status_column: String,
    /// Status value to keep (trimmed, case-insensitive).
    pub wanted_status: String,
    /// Grouping column; must be present in the header.
    pub group_column: String,
    /// Columns removed from every exported table.
    pub excluded_columns: Vec<String>,
    /// Format of the per-group tables.
    pub output_format: OutputFormat,
    /// Display width applied to every output column.
    pub column_width: f64,
    /// Deflate level of the archive.
    pub compression_level: i64,
    /// How to handle groups whose file names collide after sanitization.
    pub collision_policy: CollisionPolicy,
    /// Optional observer for progress/logging/alerts.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("format", &self.format)
            .field("status_column", &self.status_column)
            .field("wanted_status", &self.wanted_status)
            .field("group_column", &self.group_column)
            .field("excluded_columns", &self.excluded_columns)
            .field("output_format", &self.output_format)
            .field("column_width", &self.column_width)
            .field("compression_level", &self.compression_level)
            .field("collision_policy", &self.collision_policy)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            format: None,
            status_column: DEFAULT_STATUS_COLUMN.to_string(),
            wanted_status: DEFAULT_WANTED_STATUS.to_string(),
            group_column: DEFAULT_GROUP_COLUMN.to_string(),
            excluded_columns: DEFAULT_EXCLUDED_COLUMNS.iter().map(|s| s.to_string()).collect(),
            output_format: OutputFormat::default(),
            column_width: DEFAULT_COLUMN_WIDTH,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            collision_policy: CollisionPolicy::default(),
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Zip archive bytes.
    pub archive: Vec<u8>,
    /// `<sanitized label>.zip`; applying it on delivery is up to the caller.
    pub archive_name: String,
    /// Rows that passed the status filter.
    pub total_rows: usize,
    /// Group keys in first-seen order.
    pub group_keys: Vec<String>,
    /// Per-group details, in the same order as `group_keys`.
    pub groups: Vec<GroupSummary>,
    /// Caller-supplied label.
    pub label: String,
}

impl PipelineOutput {
    /// Serializable summary of this run.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            label: self.label.clone(),
            archive_name: self.archive_name.clone(),
            total_rows: self.total_rows,
            groups: self.groups.clone(),
        }
    }
}

/// Runs the split pipeline with a fixed reader, writer and options.
///
/// A `Pipeline` holds no per-run state, so one instance can serve any number of runs,
/// including concurrent ones.
pub struct Pipeline {
    options: PipelineOptions,
    reader: Box<dyn TableReader>,
    writer: Box<dyn TableWriter>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("writer_extension", &self.writer.extension())
            .finish()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}

impl Pipeline {
    /// Build a pipeline whose reader and writer follow `options`.
    pub fn new(options: PipelineOptions) -> Self {
        let reader: Box<dyn TableReader> = match options.format {
            Some(format) => format.reader(),
            None => Box::new(AutoReader),
        };
        let writer = options.output_format.writer(options.column_width);
        Self {
            options,
            reader,
            writer,
        }
    }

    /// Replace the reader (e.g. with a streaming implementation).
    pub fn with_reader(mut self, reader: impl TableReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    /// Replace the writer.
    pub fn with_writer(mut self, writer: impl TableWriter + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// Options this pipeline was built with.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Split `payload` into one table per group and archive them under `label`.
    ///
    /// When an observer is configured, this function reports:
    ///
    /// - `on_progress` for every milestone (10, 50, 60 → 90, 95, 100)
    /// - `on_success` on success, with [`RunStats`]
    /// - `on_failure` on failure, with a computed severity
    /// - `on_alert` on failure when the severity is >= `alert_at_or_above`
    pub fn run(&self, payload: &[u8], label: &str) -> PipelineResult<PipelineOutput> {
        self.run_collecting(payload, label).0
    }

    /// Like [`Self::run`], also returning every progress update emitted, in order.
    pub fn run_collecting(
        &self,
        payload: &[u8],
        label: &str,
    ) -> (PipelineResult<PipelineOutput>, Vec<ProgressEvent>) {
        let started = Instant::now();
        let ctx = RunContext {
            label: label.to_string(),
            payload_bytes: payload.len(),
        };
        let observer = self.options.observer.as_deref();
        let mut tracker = progress::RunTracker::new(&ctx, observer);

        let result = self.execute(&mut tracker, payload, label);

        if let Some(obs) = observer {
            match &result {
                Ok((out, rows_read)) => obs.on_success(
                    &ctx,
                    RunStats {
                        rows_read: *rows_read,
                        rows_matched: out.total_rows,
                        groups: out.group_keys.len(),
                        archive_bytes: out.archive.len(),
                        elapsed: started.elapsed(),
                    },
                ),
                Err(e) => {
                    let sev = severity_for_error(e);
                    obs.on_failure(&ctx, sev, e);
                    if sev >= self.options.alert_at_or_above {
                        obs.on_alert(&ctx, sev, e);
                    }
                }
            }
        }

        (result.map(|(out, _)| out), tracker.into_events())
    }

    fn execute(
        &self,
        tracker: &mut progress::RunTracker<'_>,
        payload: &[u8],
        label: &str,
    ) -> PipelineResult<(PipelineOutput, usize)> {
        let result = self.execute_stages(tracker, payload, label);
        if result.is_err() {
            tracker.fail();
        }
        result
    }

    fn execute_stages(
        &self,
        tracker: &mut progress::RunTracker<'_>,
        payload: &[u8],
        label: &str,
    ) -> PipelineResult<(PipelineOutput, usize)> {
        let opts = &self.options;

        tracker.enter(PipelineState::Reading)?;
        let table = self.reader.read(payload, &opts.group_column)?;
        let rows_read = table.row_count();

        tracker.enter(PipelineState::Filtering)?;
        let matched = filter_by_status(&table, &opts.status_column, &opts.wanted_status);
        drop(table);
        if matched.is_empty() {
            return Err(PipelineError::NoMatches {
                column: opts.status_column.clone(),
                wanted: opts.wanted_status.clone(),
            });
        }

        tracker.enter(PipelineState::Grouping)?;
        let groups = partition(&matched, &opts.group_column);
        let total_rows = matched.row_count();
        drop(matched);

        tracker.enter(PipelineState::Exporting)?;
        let mut archive = ArchiveBuilder::new(self.writer.extension())
            .with_collision_policy(opts.collision_policy)
            .with_compression_level(opts.compression_level);
        let total = groups.len();
        let mut summaries: Vec<GroupSummary> = Vec::with_capacity(total);

        for (idx0, group) in groups.iter().enumerate() {
            let export = project(&group.table, &opts.excluded_columns);
            let bytes = self
                .writer
                .write(&export, &export.sheet)
                .map_err(|source| write_error(&group.key, source))?;
            let file_name = archive.add(&group.key, bytes).to_string();
            summaries.push(GroupSummary {
                key: group.key.clone(),
                file_name,
                rows: export.row_count(),
            });
            tracker.exported(idx0 + 1, total);
        }

        tracker.enter(PipelineState::Archiving)?;
        let bytes = archive.build()?;

        tracker.enter(PipelineState::Done)?;
        let output = PipelineOutput {
            archive: bytes,
            archive_name: archive_file_name(label),
            total_rows,
            group_keys: groups.keys().map(str::to_string).collect(),
            groups: summaries,
            label: label.to_string(),
        };
        Ok((output, rows_read))
    }
}

fn write_error(group: &str, source: WriteError) -> PipelineError {
    PipelineError::Write {
        group: group.to_string(),
        source,
    }
}

/// Severity used for observer callbacks on a failed run.
pub fn severity_for_error(e: &PipelineError) -> Severity {
    match e {
        PipelineError::Read(ReadError::Empty)
        | PipelineError::Read(ReadError::MissingColumn(_))
        | PipelineError::NoMatches { .. } => Severity::Warning,
        PipelineError::Read(_) => Severity::Error,
        PipelineError::Write {
            source: WriteError::Io(_),
            ..
        } => Severity::Critical,
        PipelineError::Write { .. } => Severity::Error,
        PipelineError::Archive(ArchiveError::Io(_)) => Severity::Critical,
        PipelineError::Archive(ArchiveError::Zip(zip::result::ZipError::Io(_))) => Severity::Critical,
        PipelineError::Archive(_) => Severity::Error,
        PipelineError::Unknown { .. } => Severity::Error,
    }
}

/// Run the pipeline once with [`PipelineOptions::default`].
pub fn split_report(payload: &[u8], label: &str) -> PipelineResult<PipelineOutput> {
    Pipeline::default().run(payload, label)
}

/// Owned request object, for callers that queue runs in a job system.
#[derive(Clone)]
pub struct PipelineRequest {
    /// Raw report payload.
    pub payload: Vec<u8>,
    /// Label naming the archive.
    pub label: String,
    /// Options controlling the run.
    pub options: PipelineOptions,
}

impl fmt::Debug for PipelineRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRequest")
            .field("payload_bytes", &self.payload.len())
            .field("label", &self.label)
            .field("options", &self.options)
            .finish()
    }
}

impl PipelineRequest {
    /// Execute the request with a fresh [`Pipeline`].
    pub fn run(&self) -> PipelineResult<PipelineOutput> {
        Pipeline::new(self.options.clone()).run(&self.payload, &self.label)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{severity_for_error, Pipeline, PipelineOptions, PipelineState, ProgressLog, Severity};
    use crate::error::{ErrorKind, PipelineError, ReadError};
    use crate::ingestion::TableReader;
    use crate::types::{Schema, Table};

    struct FixedReader(Table);

    impl TableReader for FixedReader {
        fn read(&self, _payload: &[u8], _required: &str) -> Result<Table, ReadError> {
            Ok(self.0.clone())
        }
    }

    fn table(rows: &[(&str, &str)]) -> Table {
        Table::new(
            "Sheet1",
            Schema::new(["FleeName", "FinalStatus", "sync time"]),
            rows.iter()
                .map(|(k, s)| vec![k.to_string(), s.to_string(), "t".to_string()])
                .collect(),
        )
    }

    #[test]
    fn custom_reader_feeds_the_pipeline() {
        let p = Pipeline::default().with_reader(FixedReader(table(&[
            ("A", "Delivered"),
            ("B", "DELIVERED"),
            ("A", "in_transit"),
        ])));
        let out = p.run(b"ignored", "label").unwrap();
        assert_eq!(out.total_rows, 2);
        assert_eq!(out.group_keys, vec!["A", "B"]);
        assert_eq!(out.archive_name, "label.zip");
    }

    #[test]
    fn progress_is_reported_to_observer_and_returned() {
        let log = Arc::new(ProgressLog::default());
        let p = Pipeline::new(PipelineOptions {
            observer: Some(log.clone()),
            ..Default::default()
        })
        .with_reader(FixedReader(table(&[("A", "DELIVERED"), ("B", "DELIVERED")])));

        let (result, events) = p.run_collecting(b"", "x");
        assert!(result.is_ok());
        assert_eq!(log.events(), events);
        assert_eq!(log.percents(), vec![10, 50, 60, 75, 90, 95, 100]);
        assert_eq!(events.last().unwrap().state, PipelineState::Done);
    }

    #[test]
    fn no_matches_stops_after_reading() {
        let p = Pipeline::default().with_reader(FixedReader(table(&[("A", "IN_TRANSIT")])));
        let (result, events) = p.run_collecting(b"", "x");
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NoMatches);
        assert_eq!(events.iter().map(|e| e.percent).collect::<Vec<_>>(), vec![10]);
    }

    #[test]
    fn input_problems_are_warnings() {
        assert_eq!(
            severity_for_error(&PipelineError::Read(ReadError::Empty)),
            Severity::Warning
        );
        assert_eq!(
            severity_for_error(&PipelineError::Unknown {
                message: "x".to_string()
            }),
            Severity::Error
        );
    }
}
