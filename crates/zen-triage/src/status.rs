//! Ambient status indicator.
//!
//! [`describe`] is a pure function from the task list to what the indicator
//! shows. The glyph animation is cosmetic and runs independently of the data.

use std::time::Duration;

use tokio::time::Instant;
use zen_core::config::{StatusConfig, StatusTaskConfig};

use crate::timer::Ticker;

/// Glyphs cycled by the ambient animation.
pub const GLYPHS: [&str; 6] = ["·", "✻", "✽", "✶", "✳", "✢"];

/// Default period between glyph frames.
pub const DEFAULT_GLYPH_PERIOD: Duration = Duration::from_millis(200);

/// Description shown when no task is supplied.
pub const IDLE_DESCRIPTION: &str = "Monitoring your world";

/// Progress of a background task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// No known completion; no bar is drawn.
    Indeterminate,
    /// Percentage in `0..=100`.
    Percent(u8),
}

impl Progress {
    /// Any negative value means indeterminate; values above 100 are clamped.
    pub fn from_raw(raw: i32) -> Self {
        if raw < 0 {
            Progress::Indeterminate
        } else {
            Progress::Percent(raw.min(100) as u8)
        }
    }

    pub fn percent(&self) -> Option<u8> {
        match self {
            Progress::Indeterminate => None,
            Progress::Percent(p) => Some(*p),
        }
    }
}

/// One task reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTask {
    pub description: String,
    pub progress: Progress,
}

impl StatusTask {
    pub fn new(description: impl Into<String>, progress: i32) -> Self {
        Self {
            description: description.into(),
            progress: Progress::from_raw(progress),
        }
    }
}

impl From<&StatusTaskConfig> for StatusTask {
    fn from(config: &StatusTaskConfig) -> Self {
        Self::new(config.description.clone(), config.progress)
    }
}

/// What the indicator shows for a given task list and animation phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDescriptor {
    pub label: String,
    /// `None` when the bar is hidden.
    pub progress: Option<u8>,
    /// Number of tasks beyond the first.
    pub more: usize,
    pub glyph: &'static str,
    pub badge: &'static str,
}

impl StatusDescriptor {
    /// Footnote for additional tasks, e.g. `+2 more`.
    pub fn more_label(&self) -> Option<String> {
        (self.more > 0).then(|| format!("+{} more", self.more))
    }
}

/// Describe the first task, or the idle message when there is none.
pub fn describe(tasks: &[StatusTask], phase: usize) -> StatusDescriptor {
    let (label, progress) = match tasks.first() {
        Some(task) => (task.description.clone(), task.progress.percent()),
        None => (IDLE_DESCRIPTION.to_string(), None),
    };

    StatusDescriptor {
        label,
        progress,
        more: tasks.len().saturating_sub(1),
        glyph: GLYPHS[phase % GLYPHS.len()],
        badge: "Active",
    }
}

/// Free-running glyph phase. Starts from zero on every launch.
#[derive(Debug, Clone)]
pub struct GlyphCycle {
    phase: usize,
    ticker: Ticker,
}

impl GlyphCycle {
    pub fn new(period: Duration) -> Self {
        Self {
            phase: 0,
            ticker: Ticker::new(period),
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.ticker.start(now);
    }

    pub fn stop(&mut self) {
        self.ticker.stop();
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn glyph(&self) -> &'static str {
        GLYPHS[self.phase]
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.next_tick()
    }

    /// Advance by the number of elapsed periods. Returns whether the glyph changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let ticks = self.ticker.poll(now) as usize;
        if ticks == 0 {
            return false;
        }
        let before = self.phase;
        self.phase = (self.phase + ticks) % GLYPHS.len();
        self.phase != before
    }
}

/// Task list plus animation, owned by the session.
#[derive(Debug, Clone)]
pub struct StatusIndicator {
    tasks: Vec<StatusTask>,
    glyphs: GlyphCycle,
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_GLYPH_PERIOD)
    }
}

impl From<&StatusConfig> for StatusIndicator {
    fn from(config: &StatusConfig) -> Self {
        Self::new(
            config.tasks.iter().map(StatusTask::from).collect(),
            Duration::from_millis(config.glyph_period_ms),
        )
    }
}

impl StatusIndicator {
    pub fn new(tasks: Vec<StatusTask>, period: Duration) -> Self {
        Self {
            tasks,
            glyphs: GlyphCycle::new(period),
        }
    }

    /// Replace the task list. The animation phase is unaffected.
    pub fn set_tasks(&mut self, tasks: Vec<StatusTask>) {
        tracing::debug!(count = tasks.len(), "Status tasks updated");
        self.tasks = tasks;
    }

    pub fn tasks(&self) -> &[StatusTask] {
        &self.tasks
    }

    pub fn start(&mut self, now: Instant) {
        self.glyphs.start(now);
    }

    pub fn stop(&mut self) {
        self.glyphs.stop();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.glyphs.next_deadline()
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        self.glyphs.poll(now)
    }

    pub fn descriptor(&self) -> StatusDescriptor {
        describe(&self.tasks, self.glyphs.phase())
    }
}
