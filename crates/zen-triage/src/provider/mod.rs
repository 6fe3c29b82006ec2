//! Item providers.
//!
//! A provider is read once at startup and hands the queue an ordered batch of
//! validated items plus any counters already recorded today.

pub mod demo;
pub mod file;

pub use demo::DemoProvider;
pub use file::FileProvider;

use serde::{Deserialize, Serialize};
use zen_core::types::{Counters, Item};

use crate::error::{ProviderError, TriageError};
use crate::queue::TriageQueue;

/// Supplies the initial backlog.
pub trait ItemProvider {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch the batch in arrival order.
    fn fetch(&self) -> Result<ProviderBatch, ProviderError>;
}

/// Items in arrival order plus seeded counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderBatch {
    #[serde(default, alias = "completedToday")]
    pub approved_today: u64,
    #[serde(default, alias = "dismissedToday")]
    pub dismissed_today: u64,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl ProviderBatch {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_counters(mut self, counters: Counters) -> Self {
        self.approved_today = counters.approved;
        self.dismissed_today = counters.dismissed;
        self
    }

    pub fn counters(&self) -> Counters {
        Counters {
            approved: self.approved_today,
            dismissed: self.dismissed_today,
        }
    }

    /// Check every item carries its required fields.
    pub fn validate(&self) -> Result<(), ProviderError> {
        for item in &self.items {
            item.validate().map_err(|reason| ProviderError::InvalidItem {
                id: item.id.0.clone(),
                reason,
            })?;
        }
        Ok(())
    }

    /// Build the queue. Fails on duplicate ids.
    pub fn into_queue(self) -> Result<TriageQueue, TriageError> {
        let counters = self.counters();
        TriageQueue::with_counters(self.items, counters)
    }
}

/// Fetch, validate, and build a queue from `provider`.
pub fn load_queue(provider: &dyn ItemProvider) -> Result<TriageQueue, TriageError> {
    let batch = provider.fetch()?;
    batch.validate()?;
    let count = batch.items.len();
    let queue = batch.into_queue()?;
    tracing::info!(provider = provider.name(), items = count, "Items loaded");
    Ok(queue)
}
