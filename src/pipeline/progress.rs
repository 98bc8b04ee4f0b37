use crate::error::{PipelineError, PipelineResult};

use super::observer::{PipelineObserver, ProgressEvent, RunContext};
use super::state::PipelineState;

const EXPORT_START: u8 = 60;
const EXPORT_END: u8 = 90;

/// Progress while writing group `processed` of `total` (60% → 90%, linear).
pub fn exporting_percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return EXPORT_END;
    }
    let span = usize::from(EXPORT_END - EXPORT_START);
    let done = processed.min(total) * span / total;
    EXPORT_START + done as u8
}

/// Per-run state machine driver: validates transitions and emits progress.
///
/// Lives on the stack of a single run; nothing here is shared between runs.
pub(crate) struct RunTracker<'a> {
    ctx: &'a RunContext,
    observer: Option<&'a dyn PipelineObserver>,
    state: PipelineState,
    events: Vec<ProgressEvent>,
}

impl<'a> RunTracker<'a> {
    pub(crate) fn new(ctx: &'a RunContext, observer: Option<&'a dyn PipelineObserver>) -> Self {
        Self {
            ctx,
            observer,
            state: PipelineState::Idle,
            events: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> PipelineState {
        self.state
    }

    /// Move to `next`, emitting its milestone (if any).
    pub(crate) fn enter(&mut self, next: PipelineState) -> PipelineResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(PipelineError::Unknown {
                message: format!("illegal pipeline transition {} -> {}", self.state, next),
            });
        }
        self.state = next;
        if let Some(percent) = next.milestone() {
            self.emit(percent);
        }
        Ok(())
    }

    /// Report that `processed` of `total` groups have been written.
    pub(crate) fn exported(&mut self, processed: usize, total: usize) {
        self.emit(exporting_percent(processed, total));
    }

    /// Mark the run as failed. No further progress is emitted.
    pub(crate) fn fail(&mut self) {
        if self.state.can_transition_to(PipelineState::Failed) {
            self.state = PipelineState::Failed;
        }
    }

    pub(crate) fn into_events(self) -> Vec<ProgressEvent> {
        self.events
    }

    fn emit(&mut self, percent: u8) {
        if self.state == PipelineState::Failed {
            return;
        }
        let last = self.events.last().map(|e| e.percent);
        if last.is_some_and(|last| percent <= last) {
            return;
        }
        let event = ProgressEvent {
            state: self.state,
            percent: percent.min(100),
        };
        self.events.push(event);
        if let Some(obs) = self.observer {
            obs.on_progress(self.ctx, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{exporting_percent, RunTracker};
    use crate::pipeline::observer::RunContext;
    use crate::pipeline::state::PipelineState::*;

    fn ctx() -> RunContext {
        RunContext {
            label: "t".to_string(),
            payload_bytes: 0,
        }
    }

    #[test]
    fn exporting_percent_is_linear_between_60_and_90() {
        assert_eq!(exporting_percent(0, 4), 60);
        assert_eq!(exporting_percent(1, 4), 67);
        assert_eq!(exporting_percent(2, 4), 75);
        assert_eq!(exporting_percent(4, 4), 90);
        assert_eq!(exporting_percent(9, 4), 90);
        assert_eq!(exporting_percent(0, 0), 90);
    }

    #[test]
    fn full_run_emits_non_decreasing_milestones() {
        let ctx = ctx();
        let mut t = RunTracker::new(&ctx, None);
        for s in [Reading, Filtering, Grouping, Exporting] {
            t.enter(s).unwrap();
        }
        t.exported(1, 2);
        t.exported(2, 2);
        t.enter(Archiving).unwrap();
        t.enter(Done).unwrap();
        let pcts: Vec<u8> = t.into_events().iter().map(|e| e.percent).collect();
        assert_eq!(pcts, vec![10, 50, 60, 75, 90, 95, 100]);
    }

    #[test]
    fn illegal_transition_is_an_error() {
        let ctx = ctx();
        let mut t = RunTracker::new(&ctx, None);
        assert!(t.enter(Grouping).is_err());
        assert_eq!(t.state(), Idle);
    }

    #[test]
    fn failure_stops_progress() {
        let ctx = ctx();
        let mut t = RunTracker::new(&ctx, None);
        t.enter(Reading).unwrap();
        t.fail();
        assert_eq!(t.state(), Failed);
        t.exported(1, 1);
        assert_eq!(t.into_events().len(), 1);
    }
}
