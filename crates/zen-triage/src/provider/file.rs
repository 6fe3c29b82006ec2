//! Items read from a JSON or TOML file.
//!
//! The format is chosen by extension. Both share one shape:
//!
//! ```toml
//! approved_today = 3
//! dismissed_today = 1
//!
//! [[items]]
//! id = "1"
//! source = "email"
//! title = "Re: Q1 Partnership Proposal"
//! body = "Michael wants to schedule a call."
//! priority = 2
//! ```

use std::path::{Path, PathBuf};

use crate::error::ProviderError;
use crate::provider::{ItemProvider, ProviderBatch};

/// Serialization format of an item file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, ProviderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(FileFormat::Json),
            "toml" => Ok(FileFormat::Toml),
            "" => Err(ProviderError::UnsupportedFormat(format!(
                "{} has no extension",
                path.display()
            ))),
            other => Err(ProviderError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn parse(&self, content: &str) -> Result<ProviderBatch, ProviderError> {
        match self {
            FileFormat::Json => {
                serde_json::from_str(content).map_err(|e| ProviderError::Parse(e.to_string()))
            }
            FileFormat::Toml => {
                toml::from_str(content).map_err(|e| ProviderError::Parse(e.to_string()))
            }
        }
    }
}

/// Reads the backlog from a file on each fetch.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    format: FileFormat,
}

impl FileProvider {
    /// Fails if the extension is not `.json` or `.toml`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ProviderError> {
        let path = path.into();
        let format = FileFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }
}

impl ItemProvider for FileProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self) -> Result<ProviderBatch, ProviderError> {
        let content = std::fs::read_to_string(&self.path)?;
        let batch = self.format.parse(&content)?;
        batch.validate()?;
        tracing::debug!(
            path = %self.path.display(),
            items = batch.items.len(),
            "Item file parsed"
        );
        Ok(batch)
    }
}
