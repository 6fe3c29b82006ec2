use thiserror::Error;

/// Top-level error type for the Zen List application.
///
/// Subsystem crates define their own error types and convert into
/// `ZenError` at the binary boundary so that `?` works across crates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ZenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Item provider error: {0}")]
    Provider(String),

    #[error("Triage error: {0}")]
    Triage(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ZenError {
    fn from(err: toml::de::Error) -> Self {
        ZenError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ZenError {
    fn from(err: toml::ser::Error) -> Self {
        ZenError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ZenError {
    fn from(err: serde_json::Error) -> Self {
        ZenError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Zen List operations.
pub type Result<T> = std::result::Result<T, ZenError>;
