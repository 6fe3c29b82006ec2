//! Error types for the triage engine.

use crate::gesture::GestureState;
use zen_core::error::ZenError;
use zen_core::types::ItemId;

/// Errors from queue and gesture operations.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("Cannot commit: the queue is empty")]
    EmptyQueue,
    #[error("Duplicate item id in queue: {0}")]
    DuplicateItem(ItemId),
    #[error("Invalid gesture transition: {0} -> {1}")]
    InvalidTransition(GestureState, GestureState),
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("Approval executor '{executor}' failed: {reason}")]
    Executor { executor: String, reason: String },
}

/// Errors from item providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Failed to read item source: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse item source: {0}")]
    Parse(String),
    #[error("Invalid item '{id}': {reason}")]
    InvalidItem { id: String, reason: String },
    #[error("Unsupported item source format: {0}")]
    UnsupportedFormat(String),
}

impl From<TriageError> for ZenError {
    fn from(err: TriageError) -> Self {
        match err {
            TriageError::Provider(e) => ZenError::Provider(e.to_string()),
            other => ZenError::Triage(other.to_string()),
        }
    }
}

impl From<ProviderError> for ZenError {
    fn from(err: ProviderError) -> Self {
        ZenError::Provider(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triage_error_display() {
        assert_eq!(
            TriageError::EmptyQueue.to_string(),
            "Cannot commit: the queue is empty"
        );
        assert_eq!(
            TriageError::DuplicateItem(ItemId::from("7")).to_string(),
            "Duplicate item id in queue: 7"
        );
        assert_eq!(
            TriageError::InvalidTransition(GestureState::Idle, GestureState::Idle).to_string(),
            "Invalid gesture transition: idle -> idle"
        );
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::InvalidItem {
            id: "3".to_string(),
            reason: "title must not be empty".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid item '3': title must not be empty");

        let err = ProviderError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported item source format: yaml");
    }

    #[test]
    fn test_provider_error_wraps_into_triage_error() {
        let err: TriageError = ProviderError::Parse("bad json".to_string()).into();
        assert!(matches!(err, TriageError::Provider(_)));
        assert!(err.to_string().contains("bad json"));
    }

    #[test]
    fn test_conversion_into_zen_error() {
        let zen: ZenError = TriageError::EmptyQueue.into();
        assert!(matches!(zen, ZenError::Triage(_)));

        let zen: ZenError = TriageError::Provider(ProviderError::Parse("x".into())).into();
        assert!(matches!(zen, ZenError::Provider(_)));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "items.json");
        let zen: ZenError = ProviderError::Io(io).into();
        assert!(zen.to_string().contains("items.json"));
    }
}
