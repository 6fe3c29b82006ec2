//! Visible card stack.
//!
//! Derives, from the queue, which items are drawn and their static per-depth
//! presentation. Gesture state never feeds in here. Committed cards leave
//! through an [`ExitTransition`] that holds its own copy of the item.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use zen_core::config::TriageConfig;
use zen_core::types::{DecisionKind, Item};

use crate::queue::TriageQueue;

/// Default number of cards drawn.
pub const MAX_VISIBLE: usize = 3;

/// Horizontal distance an exiting card travels.
pub const EXIT_DISTANCE: f64 = 300.0;

/// Default slide-out duration.
pub const DEFAULT_EXIT_DURATION: Duration = Duration::from_millis(300);

/// Static presentation of one depth level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPresentation {
    pub scale: f64,
    pub y_offset: f64,
    pub interactive: bool,
}

/// One visible card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSlot {
    pub item: Arc<Item>,
    /// 0 is the top card.
    pub depth: usize,
    pub is_top: bool,
    pub presentation: CardPresentation,
}

/// How deep the stack goes and how each level is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackLayout {
    pub max_visible: usize,
    pub scale_step: f64,
    pub offset_step: f64,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self {
            max_visible: MAX_VISIBLE,
            scale_step: 0.05,
            offset_step: 10.0,
        }
    }
}

impl From<&TriageConfig> for StackLayout {
    fn from(config: &TriageConfig) -> Self {
        Self {
            max_visible: config.max_visible,
            scale_step: config.stack_scale_step,
            offset_step: config.stack_offset_step,
        }
    }
}

impl StackLayout {
    /// Presentation for a depth level. Only depth 0 is interactive.
    pub fn presentation(&self, depth: usize) -> CardPresentation {
        CardPresentation {
            scale: (1.0 - self.scale_step * depth as f64).max(0.0),
            y_offset: self.offset_step * depth as f64,
            interactive: depth == 0,
        }
    }
}

/// Visible cards with the default layout, head first.
pub fn render(queue: &TriageQueue) -> Vec<CardSlot> {
    render_with(queue, &StackLayout::default())
}

/// Visible cards for `layout`, head first (depth ascending).
pub fn render_with(queue: &TriageQueue, layout: &StackLayout) -> Vec<CardSlot> {
    queue
        .peek_visible(layout.max_visible)
        .into_iter()
        .enumerate()
        .map(|(depth, item)| CardSlot {
            item,
            depth,
            is_top: depth == 0,
            presentation: layout.presentation(depth),
        })
        .collect()
}

/// Back-to-front order for painting, so the top card is drawn last.
pub fn draw_order(slots: &[CardSlot]) -> impl Iterator<Item = &CardSlot> {
    slots.iter().rev()
}

// =============================================================================
// Exit transitions
// =============================================================================

/// One frame of a card leaving the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitFrame {
    pub item: Arc<Item>,
    pub kind: DecisionKind,
    pub x_offset: f64,
    pub opacity: f64,
}

/// One-shot slide-out of a committed card.
///
/// Runs to completion once started and only ever reads its captured item.
#[derive(Debug, Clone)]
pub struct ExitTransition {
    item: Arc<Item>,
    kind: DecisionKind,
    started_at: Instant,
    duration: Duration,
}

impl ExitTransition {
    pub fn new(item: Arc<Item>, kind: DecisionKind, started_at: Instant, duration: Duration) -> Self {
        Self {
            item,
            kind,
            started_at,
            duration,
        }
    }

    pub fn item(&self) -> &Arc<Item> {
        &self.item
    }

    pub fn ends_at(&self) -> Instant {
        self.started_at + self.duration
    }

    /// Linear progress in `0..=1`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.ends_at()
    }

    /// Approvals slide right, dismissals slide left, both fading out.
    pub fn frame(&self, now: Instant) -> ExitFrame {
        let p = self.progress(now);
        let direction = match self.kind {
            DecisionKind::Approve => 1.0,
            DecisionKind::Dismiss => -1.0,
        };
        ExitFrame {
            item: Arc::clone(&self.item),
            kind: self.kind,
            x_offset: direction * EXIT_DISTANCE * p,
            opacity: 1.0 - p,
        }
    }
}

/// Exit transitions currently in flight, oldest first.
#[derive(Debug, Clone)]
pub struct ExitAnimations {
    duration: Duration,
    running: Vec<ExitTransition>,
}

impl Default for ExitAnimations {
    fn default() -> Self {
        Self::new(DEFAULT_EXIT_DURATION)
    }
}

impl ExitAnimations {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            running: Vec::new(),
        }
    }

    /// Start a slide-out for a committed item.
    pub fn push(&mut self, item: Arc<Item>, kind: DecisionKind, now: Instant) {
        self.running
            .push(ExitTransition::new(item, kind, now, self.duration));
    }

    /// Drop finished transitions. Returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.running.len();
        self.running.retain(|t| !t.is_finished(now));
        before - self.running.len()
    }

    pub fn frames(&self, now: Instant) -> Vec<ExitFrame> {
        self.running
            .iter()
            .filter(|t| !t.is_finished(now))
            .map(|t| t.frame(now))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// When the earliest running transition completes.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.running.iter().map(ExitTransition::ends_at).min()
    }

    pub fn clear(&mut self) {
        self.running.clear();
    }
}
