use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ZenError};

/// Top-level configuration for the Zen List application.
///
/// Loaded from `~/.zenlist/config.toml` by default. Every section is optional
/// in the file and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZenConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub triage: TriageConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub items: ItemsConfig,
}

impl ZenConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ZenConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values the triage engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let t = &self.triage;
        if !(t.swipe_threshold.is_finite() && t.swipe_threshold > 0.0) {
            return Err(ZenError::Config(format!(
                "triage.swipe_threshold must be positive, got {}",
                t.swipe_threshold
            )));
        }
        if t.feedback_window_ms == 0 {
            return Err(ZenError::Config(
                "triage.feedback_window_ms must be greater than zero".to_string(),
            ));
        }
        if t.max_visible == 0 {
            return Err(ZenError::Config(
                "triage.max_visible must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&t.stack_scale_step) {
            return Err(ZenError::Config(format!(
                "triage.stack_scale_step must be within [0, 1), got {}",
                t.stack_scale_step
            )));
        }
        if self.status.glyph_period_ms == 0 {
            return Err(ZenError::Config(
                "status.glyph_period_ms must be greater than zero".to_string(),
            ));
        }
        if let Some(task) = self
            .status
            .tasks
            .iter()
            .find(|task| !(-1..=100).contains(&task.progress))
        {
            return Err(ZenError::Config(format!(
                "status task '{}' has progress {} outside [-1, 100]",
                task.description, task.progress
            )));
        }
        if !(self.ui.units_per_column.is_finite() && self.ui.units_per_column > 0.0) {
            return Err(ZenError::Config(format!(
                "ui.units_per_column must be positive, got {}",
                self.ui.units_per_column
            )));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// File that receives log output while the terminal UI owns stdout.
    pub log_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: "zenlist.log".to_string(),
        }
    }
}

/// Triage engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Horizontal drag distance that turns a release into a decision.
    pub swipe_threshold: f64,
    /// How long the last decision stays acknowledged, in milliseconds.
    pub feedback_window_ms: u64,
    /// Number of cards drawn from the head of the queue.
    pub max_visible: usize,
    /// Duration of the slide-out after a commit, in milliseconds.
    pub exit_duration_ms: u64,
    /// Scale reduction per depth level below the top card.
    pub stack_scale_step: f64,
    /// Vertical offset per depth level below the top card.
    pub stack_offset_step: f64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 100.0,
            feedback_window_ms: 3000,
            max_visible: 3,
            exit_duration_ms: 300,
            stack_scale_step: 0.05,
            stack_offset_step: 10.0,
        }
    }
}

/// One entry shown by the status indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTaskConfig {
    pub description: String,
    /// Percentage in `0..=100`, or `-1` for indeterminate.
    #[serde(default = "indeterminate")]
    pub progress: i32,
}

fn indeterminate() -> i32 {
    -1
}

/// Status indicator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Period of the ambient glyph animation, in milliseconds.
    pub glyph_period_ms: u64,
    /// Tasks shown at startup.
    pub tasks: Vec<StatusTaskConfig>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            glyph_period_ms: 200,
            tasks: vec![StatusTaskConfig {
                description: "Monitoring your world".to_string(),
                progress: -1,
            }],
        }
    }
}

/// Terminal presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Gesture units covered by one terminal column of mouse drag.
    pub units_per_column: f64,
    /// Characters of the title kept in the decision toast.
    pub toast_title_chars: usize,
    /// Open the shortcut overlay on launch.
    pub show_help_on_start: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            units_per_column: 10.0,
            toast_title_chars: 30,
            show_help_on_start: false,
        }
    }
}

/// Where items come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemsConfig {
    /// JSON or TOML file with items. The built-in demo set is used when unset.
    pub source: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = ZenConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_file, "zenlist.log");
        assert_eq!(config.triage.swipe_threshold, 100.0);
        assert_eq!(config.triage.feedback_window_ms, 3000);
        assert_eq!(config.triage.max_visible, 3);
        assert_eq!(config.triage.exit_duration_ms, 300);
        assert_eq!(config.status.glyph_period_ms, 200);
        assert_eq!(config.status.tasks.len(), 1);
        assert_eq!(config.status.tasks[0].progress, -1);
        assert_eq!(config.ui.toast_title_chars, 30);
        assert!(config.items.source.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"
log_file = "/tmp/zen.log"

[triage]
swipe_threshold = 80.0
feedback_window_ms = 1500
max_visible = 2

[[status.tasks]]
description = "Syncing inbox"
progress = 40

[[status.tasks]]
description = "Drafting replies"

[items]
source = "items.json"
"#;
        let file = create_temp_config(content);
        let config = ZenConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.triage.swipe_threshold, 80.0);
        assert_eq!(config.triage.feedback_window_ms, 1500);
        assert_eq!(config.triage.max_visible, 2);
        // Unset fields in a present section keep their defaults
        assert_eq!(config.triage.exit_duration_ms, 300);
        assert_eq!(config.status.tasks.len(), 2);
        assert_eq!(config.status.tasks[0].progress, 40);
        assert_eq!(config.status.tasks[1].progress, -1);
        assert_eq!(config.items.source, Some(PathBuf::from("items.json")));
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = ZenConfig::load(file.path()).unwrap();
        assert_eq!(config.triage.swipe_threshold, 100.0);
        assert_eq!(config.ui.units_per_column, 10.0);
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        assert!(matches!(
            ZenConfig::load(file.path()),
            Err(ZenError::Config(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ZenConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_or_default_rejects_invalid_values() {
        let file = create_temp_config("[triage]\nswipe_threshold = -5.0\n");
        let config = ZenConfig::load_or_default(file.path());
        assert_eq!(config.triage.swipe_threshold, 100.0);
    }

    #[test]
    fn test_save_creates_parent_dirs_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = ZenConfig::default();
        config.triage.feedback_window_ms = 4200;
        config.save(&path).unwrap();

        assert!(path.exists());
        let reloaded = ZenConfig::load(&path).unwrap();
        assert_eq!(reloaded.triage.feedback_window_ms, 4200);
        assert_eq!(reloaded.status.tasks, config.status.tasks);
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut config = ZenConfig::default();
        config.triage.swipe_threshold = 0.0;
        assert!(config.validate().is_err());
        config.triage.swipe_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_durations() {
        let mut config = ZenConfig::default();
        config.triage.feedback_window_ms = 0;
        assert!(config.validate().is_err());

        let mut config = ZenConfig::default();
        config.status.glyph_period_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_stack() {
        let mut config = ZenConfig::default();
        config.triage.max_visible = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_visible"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_progress() {
        let mut config = ZenConfig::default();
        config.status.tasks.push(StatusTaskConfig {
            description: "Overflowing".to_string(),
            progress: 140,
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Overflowing"));
    }
}
