//! Gesture classification for the top card.
//!
//! Converts a continuous horizontal drag, or a discrete keyboard signal, into
//! a terminal decision. The discrete state lives in [`state_machine`]; the
//! continuous visual feedback lives in [`crate::motion`].

pub mod state_machine;

pub use state_machine::GestureState;

use zen_core::types::DecisionKind;

use crate::error::TriageError;
use crate::gesture::state_machine::validate_transition;
use crate::motion::CardMotion;

/// Default drag distance that converts a release into a decision.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 100.0;

/// Result of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// The offset crossed the threshold; the caller must commit and then `settle`.
    Commit(DecisionKind),
    /// The offset stayed within the threshold; the card is back at rest.
    SnapBack { offset: f64 },
    /// No drag was in progress.
    Ignored,
}

/// Classifies the interaction with the current top card.
///
/// Owned by the top-card slot and reset whenever a new card becomes top.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    state: GestureState,
    offset: f64,
    threshold: f64,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl GestureClassifier {
    /// Create a classifier in `Idle` with the given threshold.
    pub fn new(threshold: f64) -> Self {
        Self {
            state: GestureState::Idle,
            offset: 0.0,
            threshold,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Current signed horizontal offset. Zero unless dragging.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_dragging(&self) -> bool {
        self.state == GestureState::Dragging
    }

    fn transition(&mut self, target: GestureState) -> Result<(), TriageError> {
        validate_transition(self.state, target)?;
        tracing::trace!("Gesture state: {} -> {}", self.state, target);
        self.state = target;
        Ok(())
    }

    /// Pointer engaged on the top card.
    pub fn begin_drag(&mut self) -> Result<(), TriageError> {
        self.transition(GestureState::Dragging)?;
        self.offset = 0.0;
        Ok(())
    }

    /// Update the live offset. Returns `false` when no drag is in progress.
    ///
    /// The offset is unbounded while dragging.
    pub fn drag_to(&mut self, offset: f64) -> bool {
        if self.state != GestureState::Dragging || !offset.is_finite() {
            return false;
        }
        self.offset = offset;
        true
    }

    /// Pointer released. Classifies the final offset against the threshold.
    pub fn release(&mut self) -> ReleaseOutcome {
        if self.state != GestureState::Dragging {
            return ReleaseOutcome::Ignored;
        }

        let x = self.offset;
        let decision = if x > self.threshold {
            Some(DecisionKind::Approve)
        } else if x < -self.threshold {
            Some(DecisionKind::Dismiss)
        } else {
            None
        };

        self.offset = 0.0;
        match decision {
            Some(kind) => {
                self.state = GestureState::committed(kind);
                ReleaseOutcome::Commit(kind)
            }
            None => {
                self.state = GestureState::Idle;
                ReleaseOutcome::SnapBack { offset: x }
            }
        }
    }

    /// Discrete keyboard decision. Only valid from `Idle`.
    pub fn signal(&mut self, kind: DecisionKind) -> Result<(), TriageError> {
        self.transition(GestureState::committed(kind))
    }

    /// Return to `Idle` after the queue has applied a commit.
    pub fn settle(&mut self) {
        if self.state.decision().is_some() {
            self.state = GestureState::Idle;
        }
        self.offset = 0.0;
    }

    /// Abandon any in-flight interaction (queue drained, view removed).
    pub fn reset(&mut self) {
        if self.state != GestureState::Idle {
            tracing::debug!("Gesture reset to idle from {}", self.state);
        }
        self.state = GestureState::Idle;
        self.offset = 0.0;
    }

    /// Visual feedback for the current offset.
    pub fn motion(&self) -> CardMotion {
        CardMotion::at(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag_and_release(offset: f64) -> (GestureClassifier, ReleaseOutcome) {
        let mut g = GestureClassifier::default();
        g.begin_drag().unwrap();
        assert!(g.drag_to(offset));
        let outcome = g.release();
        (g, outcome)
    }

    #[test]
    fn test_release_past_threshold_approves() {
        let (g, outcome) = drag_and_release(150.0);
        assert_eq!(outcome, ReleaseOutcome::Commit(DecisionKind::Approve));
        assert_eq!(g.state(), GestureState::CommittedApprove);
        assert_eq!(g.offset(), 0.0);
    }

    #[test]
    fn test_release_past_negative_threshold_dismisses() {
        let (g, outcome) = drag_and_release(-150.0);
        assert_eq!(outcome, ReleaseOutcome::Commit(DecisionKind::Dismiss));
        assert_eq!(g.state(), GestureState::CommittedDismiss);
    }

    #[test]
    fn test_release_inside_threshold_snaps_back() {
        let (g, outcome) = drag_and_release(50.0);
        assert_eq!(outcome, ReleaseOutcome::SnapBack { offset: 50.0 });
        assert_eq!(g.state(), GestureState::Idle);
        assert_eq!(g.offset(), 0.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let (_, outcome) = drag_and_release(100.0);
        assert!(matches!(outcome, ReleaseOutcome::SnapBack { .. }));
        let (_, outcome) = drag_and_release(-100.0);
        assert!(matches!(outcome, ReleaseOutcome::SnapBack { .. }));
        let (_, outcome) = drag_and_release(100.5);
        assert_eq!(outcome, ReleaseOutcome::Commit(DecisionKind::Approve));
    }

    #[test]
    fn test_only_final_offset_counts() {
        let mut g = GestureClassifier::default();
        g.begin_drag().unwrap();
        g.drag_to(180.0);
        g.drag_to(20.0);
        assert!(matches!(g.release(), ReleaseOutcome::SnapBack { .. }));
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let mut g = GestureClassifier::default();
        assert!(!g.drag_to(150.0));
        assert_eq!(g.release(), ReleaseOutcome::Ignored);
        assert_eq!(g.state(), GestureState::Idle);
    }

    #[test]
    fn test_non_finite_offset_is_rejected() {
        let mut g = GestureClassifier::default();
        g.begin_drag().unwrap();
        assert!(!g.drag_to(f64::INFINITY));
        assert_eq!(g.offset(), 0.0);
    }

    #[test]
    fn test_keyboard_signal_from_idle() {
        let mut g = GestureClassifier::default();
        g.signal(DecisionKind::Approve).unwrap();
        assert_eq!(g.state(), GestureState::CommittedApprove);
        g.settle();
        assert_eq!(g.state(), GestureState::Idle);
    }

    #[test]
    fn test_keyboard_signal_while_dragging_is_rejected() {
        let mut g = GestureClassifier::default();
        g.begin_drag().unwrap();
        assert!(g.signal(DecisionKind::Dismiss).is_err());
        assert!(g.is_dragging());
    }

    #[test]
    fn test_double_begin_is_rejected() {
        let mut g = GestureClassifier::default();
        g.begin_drag().unwrap();
        assert!(matches!(
            g.begin_drag(),
            Err(TriageError::InvalidTransition(
                GestureState::Dragging,
                GestureState::Dragging
            ))
        ));
    }

    #[test]
    fn test_motion_tracks_offset() {
        let mut g = GestureClassifier::default();
        g.begin_drag().unwrap();
        g.drag_to(-100.0);
        let m = g.motion();
        assert_eq!(m.offset, -100.0);
        assert_eq!(m.left_intensity, 1.0);
        assert_eq!(m.right_intensity, 0.0);
    }

    #[test]
    fn test_reset_abandons_drag() {
        let mut g = GestureClassifier::default();
        g.begin_drag().unwrap();
        g.drag_to(90.0);
        g.reset();
        assert_eq!(g.state(), GestureState::Idle);
        assert_eq!(g.offset(), 0.0);
    }

    #[test]
    fn test_custom_threshold() {
        let mut g = GestureClassifier::new(40.0);
        g.begin_drag().unwrap();
        g.drag_to(50.0);
        assert_eq!(g.release(), ReleaseOutcome::Commit(DecisionKind::Approve));
    }
}
