use std::fmt;

/// Stage of a pipeline run.
///
/// ```text
/// Idle → Reading → Filtering → Grouping → Exporting → Archiving → Done
///           └──────────┴───────────┴──────────┴───────────┴──→ Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Idle,
    Reading,
    Filtering,
    Grouping,
    Exporting,
    Archiving,
    Done,
    Failed,
}

impl PipelineState {
    /// Returns `true` if a run may move from `self` to `next`.
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        match (self, next) {
            (Idle, Reading)
            | (Reading, Filtering)
            | (Filtering, Grouping)
            | (Grouping, Exporting)
            | (Exporting, Archiving)
            | (Archiving, Done) => true,
            (Idle | Done | Failed, Failed) => false,
            (_, Failed) => true,
            _ => false,
        }
    }

    /// Returns `true` for `Done` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// Progress percentage reported when a run enters this state, if any.
    pub fn milestone(self) -> Option<u8> {
        match self {
            PipelineState::Reading => Some(10),
            PipelineState::Grouping => Some(50),
            PipelineState::Exporting => Some(60),
            PipelineState::Archiving => Some(95),
            PipelineState::Done => Some(100),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineState::Idle => "idle",
            PipelineState::Reading => "reading",
            PipelineState::Filtering => "filtering",
            PipelineState::Grouping => "grouping",
            PipelineState::Exporting => "exporting",
            PipelineState::Archiving => "archiving",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(s)
    }
}
