use serde::{Deserialize, Serialize};

use crate::types::{DecisionId, DecisionKind, ItemId, Timestamp};

/// Domain events emitted by the triage session.
///
/// Events are produced after a state change has been fully applied and are
/// consumed by the host for structured logging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TriageEvent {
    /// A session was created from a provider batch.
    SessionStarted {
        item_count: usize,
        timestamp: Timestamp,
    },

    /// An item left the queue with a decision.
    DecisionCommitted {
        decision_id: DecisionId,
        item_id: ItemId,
        kind: DecisionKind,
        remaining: usize,
        timestamp: Timestamp,
    },

    /// A drag was released inside the threshold and the card returned home.
    GestureSnappedBack {
        item_id: ItemId,
        offset: f64,
        timestamp: Timestamp,
    },

    /// The acknowledgement of a decision timed out.
    FeedbackExpired {
        decision_id: DecisionId,
        timestamp: Timestamp,
    },

    /// The shortcut overlay was shown or hidden.
    HelpToggled { visible: bool, timestamp: Timestamp },

    /// The last item was committed.
    QueueDrained {
        approved: u64,
        dismissed: u64,
        timestamp: Timestamp,
    },

    /// An internal invariant was violated; the session recovered.
    InvariantViolated { reason: String, timestamp: Timestamp },
}

impl TriageEvent {
    /// Returns the timestamp of the event.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            TriageEvent::SessionStarted { timestamp, .. }
            | TriageEvent::DecisionCommitted { timestamp, .. }
            | TriageEvent::GestureSnappedBack { timestamp, .. }
            | TriageEvent::FeedbackExpired { timestamp, .. }
            | TriageEvent::HelpToggled { timestamp, .. }
            | TriageEvent::QueueDrained { timestamp, .. }
            | TriageEvent::InvariantViolated { timestamp, .. } => *timestamp,
        }
    }

    /// Returns a human-readable event name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            TriageEvent::SessionStarted { .. } => "session_started",
            TriageEvent::DecisionCommitted { .. } => "decision_committed",
            TriageEvent::GestureSnappedBack { .. } => "gesture_snapped_back",
            TriageEvent::FeedbackExpired { .. } => "feedback_expired",
            TriageEvent::HelpToggled { .. } => "help_toggled",
            TriageEvent::QueueDrained { .. } => "queue_drained",
            TriageEvent::InvariantViolated { .. } => "invariant_violated",
        }
    }
}
