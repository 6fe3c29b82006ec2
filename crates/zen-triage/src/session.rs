//! Triage session.
//!
//! Single owner of all mutable triage state. Input events are applied strictly
//! in arrival order and each call finishes its effects before returning, so a
//! keypress and a drag release can never both commit the same card. Timers are
//! host-driven: wait for [`TriageSession::next_deadline`], then call
//! [`TriageSession::poll_timers`].

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use zen_core::config::ZenConfig;
use zen_core::events::TriageEvent;
use zen_core::types::{Counters, Decision, DecisionKind, ItemId, Timestamp};

use crate::executor::{ApprovalExecutor, LogExecutor};
use crate::feedback::FeedbackController;
use crate::gesture::{GestureClassifier, GestureState, ReleaseOutcome};
use crate::keymap::Command;
use crate::motion::CardMotion;
use crate::queue::TriageQueue;
use crate::stack::{self, CardSlot, ExitAnimations, ExitFrame, StackLayout};
use crate::status::{StatusDescriptor, StatusIndicator};

/// Redraw interval while an exit transition is running.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// One input, already translated from the terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Command(Command),
    /// Pointer pressed on a card. Ignored unless `target` is the top card.
    DragStart { target: ItemId },
    /// Pointer moved; signed horizontal offset from the press point.
    DragMove { offset: f64 },
    /// Pointer released. `offset` is the position at release when the host
    /// knows it; otherwise the last `DragMove` is classified.
    DragEnd { offset: Option<f64> },
}

/// Result of handling one input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    pub events: Vec<TriageEvent>,
    pub quit: bool,
}

/// Tunables pulled from configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub swipe_threshold: f64,
    pub feedback_window: Duration,
    pub exit_duration: Duration,
    pub layout: StackLayout,
    pub toast_title_chars: usize,
    pub show_help: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&ZenConfig::default())
    }
}

impl From<&ZenConfig> for SessionSettings {
    fn from(config: &ZenConfig) -> Self {
        Self {
            swipe_threshold: config.triage.swipe_threshold,
            feedback_window: Duration::from_millis(config.triage.feedback_window_ms),
            exit_duration: Duration::from_millis(config.triage.exit_duration_ms),
            layout: StackLayout::from(&config.triage),
            toast_title_chars: config.ui.toast_title_chars,
            show_help: config.ui.show_help_on_start,
        }
    }
}

/// Acknowledgement shown while the feedback window is open.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: DecisionKind,
    pub message: String,
}

/// Everything the UI needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    /// Head first.
    pub cards: Vec<CardSlot>,
    pub top_motion: CardMotion,
    pub gesture: GestureState,
    pub exits: Vec<ExitFrame>,
    pub toast: Option<Toast>,
    pub counters: Counters,
    pub remaining: usize,
    pub help_visible: bool,
    pub all_clear: bool,
    pub status: StatusDescriptor,
}

impl SessionView {
    /// e.g. `3 items need your attention`.
    pub fn header(&self) -> String {
        let noun = if self.remaining == 1 { "item" } else { "items" };
        format!("{} {} need your attention", self.remaining, noun)
    }
}

/// The triage engine for one run of the application.
pub struct TriageSession {
    queue: TriageQueue,
    gesture: GestureClassifier,
    layout: StackLayout,
    exits: ExitAnimations,
    feedback: FeedbackController,
    status: StatusIndicator,
    executor: Box<dyn ApprovalExecutor>,
    toast_title_chars: usize,
    help_visible: bool,
    outbox: Vec<TriageEvent>,
}

impl TriageSession {
    /// Start a session over `queue`. The glyph animation begins at `now`.
    pub fn new(
        queue: TriageQueue,
        settings: SessionSettings,
        status: StatusIndicator,
        now: Instant,
    ) -> Self {
        let mut status = status;
        status.start(now);

        let item_count = queue.len();
        tracing::info!(
            items = item_count,
            approved = queue.approved_count(),
            dismissed = queue.dismissed_count(),
            "Triage session started"
        );

        Self {
            queue,
            gesture: GestureClassifier::new(settings.swipe_threshold),
            layout: settings.layout,
            exits: ExitAnimations::new(settings.exit_duration),
            feedback: FeedbackController::new(settings.feedback_window),
            status,
            executor: Box::new(LogExecutor),
            toast_title_chars: settings.toast_title_chars,
            help_visible: settings.show_help,
            outbox: vec![TriageEvent::SessionStarted {
                item_count,
                timestamp: Timestamp::now(),
            }],
        }
    }

    /// Replace the approval executor.
    pub fn with_executor(mut self, executor: Box<dyn ApprovalExecutor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn queue(&self) -> &TriageQueue {
        &self.queue
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn status_mut(&mut self) -> &mut StatusIndicator {
        &mut self.status
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.feedback.current()
    }

    /// Events produced outside `handle`/`poll_timers`, such as session start.
    pub fn drain_events(&mut self) -> Vec<TriageEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Apply one input.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Step {
        let mut quit = false;

        match event {
            InputEvent::Command(Command::Decide(kind)) => self.decide_by_key(kind, now),
            InputEvent::Command(Command::ToggleHelp) => {
                self.help_visible = !self.help_visible;
                self.outbox.push(TriageEvent::HelpToggled {
                    visible: self.help_visible,
                    timestamp: Timestamp::now(),
                });
            }
            InputEvent::Command(Command::Quit) => quit = true,
            InputEvent::DragStart { target } => self.begin_drag(&target),
            InputEvent::DragMove { offset } => {
                self.gesture.drag_to(offset);
            }
            InputEvent::DragEnd { offset } => self.end_drag(offset, now),
        }

        Step {
            events: self.drain_events(),
            quit,
        }
    }

    fn decide_by_key(&mut self, kind: DecisionKind, now: Instant) {
        if self.queue.is_empty() {
            tracing::debug!(%kind, "Decision key ignored: queue is empty");
            return;
        }
        if let Err(e) = self.gesture.signal(kind) {
            tracing::debug!("Decision key ignored: {}", e);
            return;
        }
        self.commit(kind, now);
    }

    fn begin_drag(&mut self, target: &ItemId) {
        let Some(top) = self.queue.peek_top() else {
            return;
        };
        if &top.id != target {
            tracing::trace!(%target, top = %top.id, "Drag on non-top card ignored");
            return;
        }
        if let Err(e) = self.gesture.begin_drag() {
            tracing::debug!("Drag start ignored: {}", e);
        }
    }

    fn end_drag(&mut self, offset: Option<f64>, now: Instant) {
        if let Some(offset) = offset {
            self.gesture.drag_to(offset);
        }
        match self.gesture.release() {
            ReleaseOutcome::Commit(kind) => self.commit(kind, now),
            ReleaseOutcome::SnapBack { offset } => {
                if let Some(top) = self.queue.peek_top() {
                    self.outbox.push(TriageEvent::GestureSnappedBack {
                        item_id: top.id.clone(),
                        offset,
                        timestamp: Timestamp::now(),
                    });
                }
            }
            ReleaseOutcome::Ignored => {}
        }
    }

    /// Apply a decided gesture to the queue, then return the gesture to idle.
    fn commit(&mut self, kind: DecisionKind, now: Instant) {
        match self.queue.commit(kind) {
            Ok(decision) => {
                self.exits.push(Arc::clone(&decision.item), kind, now);

                if kind == DecisionKind::Approve {
                    if let Err(e) = self.executor.execute(&decision) {
                        tracing::warn!(
                            executor = self.executor.name(),
                            item_id = %decision.item.id,
                            "Approval executor failed: {}",
                            e
                        );
                    }
                }

                let remaining = self.queue.len();
                self.outbox.push(TriageEvent::DecisionCommitted {
                    decision_id: decision.id,
                    item_id: decision.item.id.clone(),
                    kind,
                    remaining,
                    timestamp: Timestamp::from_datetime(decision.decided_at),
                });
                self.feedback.record(decision, now);

                if remaining == 0 {
                    let counters = self.queue.counters();
                    self.outbox.push(TriageEvent::QueueDrained {
                        approved: counters.approved,
                        dismissed: counters.dismissed,
                        timestamp: Timestamp::now(),
                    });
                }
            }
            Err(e) => {
                tracing::error!("Triage invariant violated: {}", e);
                self.outbox.push(TriageEvent::InvariantViolated {
                    reason: e.to_string(),
                    timestamp: Timestamp::now(),
                });
            }
        }
        self.gesture.settle();
    }

    /// Fire whatever timers are due at `now`.
    pub fn poll_timers(&mut self, now: Instant) -> Vec<TriageEvent> {
        if let Some(expired) = self.feedback.poll_expired(now) {
            tracing::debug!(decision_id = %expired.id, "Feedback expired");
            self.outbox.push(TriageEvent::FeedbackExpired {
                decision_id: expired.id,
                timestamp: Timestamp::now(),
            });
        }
        self.exits.prune(now);
        self.status.poll(now);
        self.drain_events()
    }

    /// Earliest instant at which the session needs attention again.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let frame = (!self.exits.is_empty()).then(|| now + FRAME_INTERVAL);
        [
            self.feedback.next_deadline(),
            self.exits.next_deadline(),
            self.status.next_deadline(),
            frame,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Read-only view for drawing.
    pub fn snapshot(&self, now: Instant) -> SessionView {
        let toast = self.feedback.current().map(|decision| Toast {
            kind: decision.kind,
            message: decision.summary(self.toast_title_chars),
        });

        SessionView {
            cards: stack::render_with(&self.queue, &self.layout),
            top_motion: self.gesture.motion(),
            gesture: self.gesture.state(),
            exits: self.exits.frames(now),
            toast,
            counters: self.queue.counters(),
            remaining: self.queue.len(),
            help_visible: self.help_visible,
            all_clear: self.queue.is_empty(),
            status: self.status.descriptor(),
        }
    }

    /// Cancel pending timers and report the final tallies.
    pub fn shutdown(&mut self) -> Counters {
        self.feedback.cancel();
        self.exits.clear();
        self.status.stop();
        self.gesture.reset();

        let counters = self.queue.counters();
        tracing::info!(
            approved = counters.approved,
            dismissed = counters.dismissed,
            remaining = self.queue.len(),
            "Triage session ended"
        );
        counters
    }
}
