//! Approval execution seam.
//!
//! Approving an item commits to carrying out its proposed action somewhere
//! outside the triage engine. The session calls the executor once per approve,
//! after the queue has committed; failures are logged and never undo the
//! decision.

use zen_core::types::Decision;

use crate::error::TriageError;

/// Carries out the external side of an approval.
pub trait ApprovalExecutor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Act on an approved decision.
    fn execute(&self, decision: &Decision) -> Result<(), TriageError>;

    /// Human-readable description of what `execute` would do.
    fn describe(&self, decision: &Decision) -> String {
        match &decision.item.proposed_action {
            Some(action) => format!("{}: {}", decision.item.title, action),
            None => format!("{}: no proposed action", decision.item.title),
        }
    }
}

/// Records approvals in the log and performs nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogExecutor;

impl ApprovalExecutor for LogExecutor {
    fn name(&self) -> &'static str {
        "log"
    }

    fn execute(&self, decision: &Decision) -> Result<(), TriageError> {
        tracing::info!(
            decision_id = %decision.id,
            item_id = %decision.item.id,
            action = decision.item.proposed_action.as_deref().unwrap_or("<none>"),
            "Approval recorded"
        );
        Ok(())
    }
}
