//! CLI argument definitions for the Zen List application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::{Path, PathBuf};

use zen_core::config::ZenConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "ZENLIST_CONFIG";

/// Zen List: triage incoming items one card at a time.
#[derive(Parser, Debug)]
#[command(name = "zenlist", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// JSON or TOML file with items to triage. Uses the demo set when absent.
    #[arg(short = 'i', long = "items")]
    pub items: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// File that receives log output.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > ZENLIST_CONFIG env var > ~/.zenlist/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        self.config_path_with_env(std::env::var(CONFIG_ENV).ok())
    }

    fn config_path_with_env(&self, env: Option<String>) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Some(p) = env.filter(|p| !p.is_empty()) {
            return PathBuf::from(p);
        }
        default_config_dir().join("config.toml")
    }

    /// Resolve the item source.
    ///
    /// Priority: --items flag > `items.source` in config. `None` means demo items.
    pub fn resolve_items_path(&self, config: &ZenConfig) -> Option<PathBuf> {
        self.items.clone().or_else(|| config.items.source.clone())
    }

    /// Resolve an explicit log level.
    ///
    /// Only the flag is returned here; RUST_LOG and the config value are
    /// consulted by the logging setup when this is `None`.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }

    /// Resolve the log file.
    ///
    /// Priority: --log-file flag > `general.log_file`. A relative config value
    /// is placed next to the configuration file.
    pub fn resolve_log_file(&self, config: &ZenConfig, config_path: &Path) -> PathBuf {
        if let Some(ref p) = self.log_file {
            return p.clone();
        }
        let configured = PathBuf::from(&config.general.log_file);
        if configured.is_absolute() {
            return configured;
        }
        match config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(configured),
            _ => configured,
        }
    }
}

/// Default configuration directory for the current platform.
fn default_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".zenlist");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".zenlist");
    }
    PathBuf::from(".")
}
