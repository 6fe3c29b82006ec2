//! Gesture state machine with validated transitions.
//!
//! Enforces the allowed transitions for one card interaction:
//! Idle -> Dragging -> CommittedApprove/CommittedDismiss -> Idle
//! Dragging -> Idle (snap-back)
//! Idle -> CommittedApprove/CommittedDismiss (keyboard)

use std::fmt;

use zen_core::types::DecisionKind;

use crate::error::TriageError;

/// Discrete state of the top-card interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No drag in progress.
    Idle,
    /// Pointer engaged on the top card.
    Dragging,
    /// Terminal: approve was decided, waiting for the queue commit.
    CommittedApprove,
    /// Terminal: dismiss was decided, waiting for the queue commit.
    CommittedDismiss,
}

impl GestureState {
    /// The committed state for a decision kind.
    pub fn committed(kind: DecisionKind) -> Self {
        match kind {
            DecisionKind::Approve => GestureState::CommittedApprove,
            DecisionKind::Dismiss => GestureState::CommittedDismiss,
        }
    }

    /// The decision carried by a committed state.
    pub fn decision(&self) -> Option<DecisionKind> {
        match self {
            GestureState::CommittedApprove => Some(DecisionKind::Approve),
            GestureState::CommittedDismiss => Some(DecisionKind::Dismiss),
            GestureState::Idle | GestureState::Dragging => None,
        }
    }

    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: GestureState) -> bool {
        matches!(
            (self, target),
            (GestureState::Idle, GestureState::Dragging)
                | (GestureState::Dragging, GestureState::CommittedApprove)
                | (GestureState::Dragging, GestureState::CommittedDismiss)
                | (GestureState::Dragging, GestureState::Idle)
                // Keyboard path skips Dragging
                | (GestureState::Idle, GestureState::CommittedApprove)
                | (GestureState::Idle, GestureState::CommittedDismiss)
                | (GestureState::CommittedApprove, GestureState::Idle)
                | (GestureState::CommittedDismiss, GestureState::Idle)
        )
    }
}

impl fmt::Display for GestureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureState::Idle => write!(f, "idle"),
            GestureState::Dragging => write!(f, "dragging"),
            GestureState::CommittedApprove => write!(f, "committed_approve"),
            GestureState::CommittedDismiss => write!(f, "committed_dismiss"),
        }
    }
}

/// Validate that a gesture transition is allowed.
pub fn validate_transition(from: GestureState, to: GestureState) -> Result<(), TriageError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(TriageError::InvalidTransition(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [GestureState; 4] = [
        GestureState::Idle,
        GestureState::Dragging,
        GestureState::CommittedApprove,
        GestureState::CommittedDismiss,
    ];

    // =====================================================================
    // Valid transitions
    // =====================================================================

    #[test]
    fn test_drag_path() {
        assert!(validate_transition(GestureState::Idle, GestureState::Dragging).is_ok());
        assert!(validate_transition(GestureState::Dragging, GestureState::CommittedApprove).is_ok());
        assert!(validate_transition(GestureState::Dragging, GestureState::CommittedDismiss).is_ok());
        assert!(validate_transition(GestureState::Dragging, GestureState::Idle).is_ok());
    }

    #[test]
    fn test_keyboard_path_skips_dragging() {
        assert!(validate_transition(GestureState::Idle, GestureState::CommittedApprove).is_ok());
        assert!(validate_transition(GestureState::Idle, GestureState::CommittedDismiss).is_ok());
    }

    #[test]
    fn test_committed_settles_to_idle() {
        assert!(validate_transition(GestureState::CommittedApprove, GestureState::Idle).is_ok());
        assert!(validate_transition(GestureState::CommittedDismiss, GestureState::Idle).is_ok());
    }

    // =====================================================================
    // Invalid transitions
    // =====================================================================

    #[test]
    fn test_no_self_transitions() {
        for state in ALL {
            assert!(validate_transition(state, state).is_err(), "{state} -> {state}");
        }
    }

    #[test]
    fn test_committed_cannot_drag_or_flip() {
        assert!(validate_transition(GestureState::CommittedApprove, GestureState::Dragging).is_err());
        assert!(validate_transition(GestureState::CommittedApprove, GestureState::CommittedDismiss).is_err());
        assert!(validate_transition(GestureState::CommittedDismiss, GestureState::CommittedApprove).is_err());
    }

    #[test]
    fn test_all_valid_transitions_count() {
        let mut valid = 0;
        for from in ALL {
            for to in ALL {
                if from.can_transition_to(to) {
                    valid += 1;
                }
            }
        }
        assert_eq!(valid, 8, "Expected exactly 8 valid transitions");
    }

    #[test]
    fn test_decision_mapping() {
        assert_eq!(
            GestureState::committed(DecisionKind::Approve).decision(),
            Some(DecisionKind::Approve)
        );
        assert_eq!(
            GestureState::committed(DecisionKind::Dismiss).decision(),
            Some(DecisionKind::Dismiss)
        );
        assert_eq!(GestureState::Dragging.decision(), None);
    }

    #[test]
    fn test_invalid_transition_error_message() {
        let err = validate_transition(GestureState::Dragging, GestureState::Dragging).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("dragging"));
    }
}
