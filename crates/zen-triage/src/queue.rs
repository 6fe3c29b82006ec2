//! Ordered triage backlog.
//!
//! Holds items in arrival order (never re-sorted by priority) and owns the
//! approve/dismiss counters. `commit` is the only mutator of order.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use zen_core::types::{Counters, Decision, DecisionKind, Item};

use crate::error::TriageError;

/// The ordered queue of items awaiting a decision.
#[derive(Debug, Clone, Default)]
pub struct TriageQueue {
    items: VecDeque<Arc<Item>>,
    counters: Counters,
}

impl TriageQueue {
    /// Build a queue from an initial batch with zeroed counters.
    ///
    /// Fails with `DuplicateItem` if two items share an id.
    pub fn new(items: Vec<Item>) -> Result<Self, TriageError> {
        Self::with_counters(items, Counters::default())
    }

    /// Build a queue whose counters start from previously recorded tallies.
    pub fn with_counters(items: Vec<Item>, counters: Counters) -> Result<Self, TriageError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.clone()) {
                return Err(TriageError::DuplicateItem(item.id.clone()));
            }
        }

        Ok(Self {
            items: items.into_iter().map(Arc::new).collect(),
            counters,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The head item, if any.
    pub fn peek_top(&self) -> Option<&Arc<Item>> {
        self.items.front()
    }

    /// Up to `n` items, head first.
    pub fn peek_visible(&self, n: usize) -> Vec<Arc<Item>> {
        self.items.iter().take(n).cloned().collect()
    }

    pub fn approved_count(&self) -> u64 {
        self.counters.approved
    }

    pub fn dismissed_count(&self) -> u64 {
        self.counters.dismissed
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Remove the head item, bump the matching counter, and return the decision.
    ///
    /// All three effects happen together or not at all.
    pub fn commit(&mut self, kind: DecisionKind) -> Result<Decision, TriageError> {
        let item = self.items.pop_front().ok_or(TriageError::EmptyQueue)?;

        match kind {
            DecisionKind::Approve => self.counters.approved += 1,
            DecisionKind::Dismiss => self.counters.dismissed += 1,
        }

        let decision = Decision::new(item, kind);
        tracing::debug!(
            item_id = %decision.item.id,
            kind = %kind,
            remaining = self.items.len(),
            "Item committed"
        );
        Ok(decision)
    }
}
