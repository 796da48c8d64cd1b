use serde::{Deserialize, Serialize};

/// Per-pass counts of what happened to each raw record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl ReconciliationResult {
    pub fn processed(&self) -> usize {
        self.added + self.updated + self.skipped
    }
}

/// How a gated pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Committed(ReconciliationResult),
    /// Staged changes were discarded; the counts are what would have been written.
    Vetoed(ReconciliationResult),
}

impl GateOutcome {
    pub fn result(&self) -> &ReconciliationResult {
        match self {
            GateOutcome::Committed(r) | GateOutcome::Vetoed(r) => r,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, GateOutcome::Committed(_))
    }
}
