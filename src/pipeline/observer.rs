use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::PipelineError;

use super::state::PipelineState;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// The input was unusable (empty file, missing column, nothing matched).
    Warning,
    /// The run failed while producing output.
    Error,
    /// Infrastructure failure (I/O).
    Critical,
}

/// Context about a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Caller-supplied label the archive is named after.
    pub label: String,
    /// Size of the input payload in bytes.
    pub payload_bytes: usize,
}

/// A single progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Stage the run is in when the update is emitted.
    pub state: PipelineState,
    /// Overall completion, `0..=100`.
    pub percent: u8,
}

/// Stats reported on a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Data rows read from the source sheet.
    pub rows_read: usize,
    /// Rows that passed the status filter.
    pub rows_matched: usize,
    /// Number of groups (= archive entries unless names collided under overwrite).
    pub groups: usize,
    /// Size of the produced archive.
    pub archive_bytes: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Observer interface for pipeline progress and outcomes.
///
/// Implementors can drive a progress bar, record metrics, write logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called on every progress update (values never decrease within a run).
    fn on_progress(&self, _ctx: &RunContext, _event: ProgressEvent) {}

    /// Called when a run succeeds.
    fn on_success(&self, _ctx: &RunContext, _stats: RunStats) {}

    /// Called when a run fails.
    fn on_failure(&self, _ctx: &RunContext, _severity: Severity, _error: &PipelineError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_progress(&self, ctx: &RunContext, event: ProgressEvent) {
        for o in &self.observers {
            o.on_progress(ctx, event);
        }
    }

    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_progress(&self, ctx: &RunContext, event: ProgressEvent) {
        eprintln!(
            "[split][{}] label={} progress={}%",
            event.state, ctx.label, event.percent
        );
    }

    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        eprintln!(
            "[split][ok] label={} rows={} matched={} groups={} archive_bytes={} elapsed={:?}",
            ctx.label, stats.rows_read, stats.rows_matched, stats.groups, stats.archive_bytes, stats.elapsed
        );
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        eprintln!(
            "[split][{:?}] label={} kind={:?} err={}",
            severity,
            ctx.label,
            error.kind(),
            error
        );
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        eprintln!(
            "[ALERT][split][{:?}] label={} kind={:?} err={}",
            severity,
            ctx.label,
            error.kind(),
            error
        );
    }
}

/// Appends pipeline outcomes to a local log file. Progress updates are not logged.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        self.append_line(&format!(
            "{} ok label={} rows={} matched={} groups={} archive_bytes={}",
            unix_ts(),
            ctx.label,
            stats.rows_read,
            stats.rows_matched,
            stats.groups,
            stats.archive_bytes
        ));
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        self.append_line(&format!(
            "{} fail severity={:?} kind={:?} label={} err={}",
            unix_ts(),
            severity,
            error.kind(),
            ctx.label,
            error
        ));
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} kind={:?} label={} err={}",
            unix_ts(),
            severity,
            error.kind(),
            ctx.label,
            error
        ));
    }
}

/// Records progress updates in memory, e.g. to replay them into a UI or assert on them in tests.
#[derive(Debug, Default)]
pub struct ProgressLog {
    events: Mutex<Vec<ProgressEvent>>,
}

impl ProgressLog {
    /// Snapshot of every update received so far.
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Percentages received so far.
    pub fn percents(&self) -> Vec<u8> {
        self.events().iter().map(|e| e.percent).collect()
    }
}

impl PipelineObserver for ProgressLog {
    fn on_progress(&self, _ctx: &RunContext, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
