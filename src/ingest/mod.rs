pub mod gate;
pub mod model;
pub mod reconcile;

pub use gate::{AutoConfirm, CommitGate, Confirm, StdinPrompt};
pub use model::{GateOutcome, ReconciliationResult};
pub use reconcile::ReconciliationEngine;
