//! What a run did, step by step.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::ApplicationError;

/// Result of one successfully executed step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Completed,
    /// The work was already there (the entry point was already patched).
    AlreadyApplied,
    /// The step could not do its work but the run continues.
    Skipped(ApplicationError),
}

impl StepOutcome {
    pub fn warning(&self) -> Option<&ApplicationError> {
        match self {
            Self::Skipped(warning) => Some(warning),
            _ => None,
        }
    }
}

/// Summary of a completed run. Returned only when every step succeeded;
/// a failing step surfaces as an error instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReport {
    /// Correlates log lines of one run.
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One entry per plan step, in plan order.
    pub outcomes: Vec<StepOutcome>,
}

impl ExecutionReport {
    pub fn steps(&self) -> usize {
        self.outcomes.len()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ApplicationError> {
        self.outcomes.iter().filter_map(StepOutcome::warning)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
