use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Where an attention item came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    /// Incoming email thread.
    Email,
    /// Chat message (Slack and friends).
    #[serde(alias = "slack")]
    Chat,
    /// Task tracker entry.
    Task,
    /// Calendar reminder.
    Calendar,
    /// Suggestion generated by the assistant itself.
    #[serde(alias = "neo")]
    System,
}

impl SourceCategory {
    /// All categories in display order.
    pub const ALL: [SourceCategory; 5] = [
        SourceCategory::Email,
        SourceCategory::Chat,
        SourceCategory::Task,
        SourceCategory::Calendar,
        SourceCategory::System,
    ];
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceCategory::Email => write!(f, "email"),
            SourceCategory::Chat => write!(f, "chat"),
            SourceCategory::Task => write!(f, "task"),
            SourceCategory::Calendar => write!(f, "calendar"),
            SourceCategory::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for SourceCategory {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(SourceCategory::Email),
            "chat" | "slack" => Ok(SourceCategory::Chat),
            "task" => Ok(SourceCategory::Task),
            "calendar" => Ok(SourceCategory::Calendar),
            "system" | "neo" => Ok(SourceCategory::System),
            _ => Err(format!("Unknown source category: {}", s)),
        }
    }
}

/// The binary outcome of triaging one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// Commit the suggested action.
    Approve,
    /// Discard the item.
    Dismiss,
}

impl DecisionKind {
    /// Label used in user-facing acknowledgements.
    pub fn past_tense(&self) -> &'static str {
        match self {
            DecisionKind::Approve => "Approved",
            DecisionKind::Dismiss => "Dismissed",
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionKind::Approve => write!(f, "approve"),
            DecisionKind::Dismiss => write!(f, "dismiss"),
        }
    }
}

// =============================================================================
// Newtype Wrappers
// =============================================================================

/// Identity of an item. Two items with the same id are the same item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a committed decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionId(pub Uuid);

impl DecisionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DecisionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Urgency ordinal, 1 (most urgent) through 5.
///
/// Invariant: the inner value is always within `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const CRITICAL: Priority = Priority(1);
    pub const FYI: Priority = Priority(5);

    pub fn new(value: u8) -> std::result::Result<Self, String> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!("Priority must be within 1..=5, got {}", value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Human label shown on the card badge.
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Critical",
            2 => "High",
            3 => "Medium",
            4 => "Low",
            _ => "FYI",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;
    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Priority::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.0
    }
}

/// Unix timestamp in seconds since epoch.
///
/// Compared by value. Two Timestamps with the same inner value are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// A single unit of incoming attention awaiting a human decision.
///
/// Items are never mutated after creation; identity is the `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub source: SourceCategory,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    pub priority: Priority,
    #[serde(default, alias = "proposedAction", skip_serializing_if = "Option::is_none")]
    pub proposed_action: Option<String>,
    #[serde(default, alias = "time", skip_serializing_if = "Option::is_none")]
    pub time_label: Option<String>,
}

impl Item {
    /// Create an item with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        source: SourceCategory,
        title: impl Into<String>,
        body: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            source,
            title: title.into(),
            body: body.into(),
            sender: None,
            priority,
            proposed_action: None,
            time_label: None,
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn with_proposed_action(mut self, action: impl Into<String>) -> Self {
        self.proposed_action = Some(action.into());
        self
    }

    pub fn with_time_label(mut self, label: impl Into<String>) -> Self {
        self.time_label = Some(label.into());
        self
    }

    /// Check the fields a provider must fill in.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.id.0.trim().is_empty() {
            return Err("id must not be empty".to_string());
        }
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_string());
        }
        Ok(())
    }

    /// Title cut to at most `max_chars` characters, char-boundary safe.
    pub fn title_prefix(&self, max_chars: usize) -> &str {
        match self.title.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.title[..idx],
            None => &self.title,
        }
    }
}

/// A committed triage decision.
///
/// Created the instant a gesture or key commits. Never mutated; superseded by
/// the next decision.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub id: DecisionId,
    pub item: Arc<Item>,
    pub kind: DecisionKind,
    pub decided_at: DateTime<Utc>,
}

impl Decision {
    pub fn new(item: Arc<Item>, kind: DecisionKind) -> Self {
        Self {
            id: DecisionId::new(),
            item,
            kind,
            decided_at: Utc::now(),
        }
    }

    /// Toast line, e.g. `Approved: Re: Q1 Partnership Proposal...`.
    pub fn summary(&self, max_title_chars: usize) -> String {
        format!(
            "{}: {}...",
            self.kind.past_tense(),
            self.item.title_prefix(max_title_chars)
        )
    }
}

/// Lifetime approve/dismiss tallies for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub approved: u64,
    pub dismissed: u64,
}
