//! Configuration module for gadgets-rs
//!
//! Settings are stored as TOML in the platform-appropriate config directory:
//! - **Linux**: `~/.config/gadgets-rs/config.toml`
//! - **macOS**: `~/Library/Application Support/gadgets-rs/config.toml`
//! - **Windows**: `%APPDATA%\gadgets-rs\config.toml`
//!
//! Every section and field has a default, so partial files load fine.
//!
//! # Example
//!
//! ```ignore
//! use gadgets_rs::config::AppConfig;
//!
//! let config = AppConfig::load_or_default();
//! let pipeline = Pipeline::with_config(config.pipeline.clone());
//! ```

use crate::error::{GadgetsError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for the config directory
pub const APP_ID: &str = "gadgets-rs";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Default tracing filter directive
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default bound on the number of hops a single cascade may take
pub const DEFAULT_MAX_CASCADE_DEPTH: usize = 1024;

/// Get the application config directory path
pub fn app_config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the default config file
pub fn config_path() -> Option<PathBuf> {
    app_config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset
    pub filter: String,

    /// Directory for daily-rotated log files; console only when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            log_dir: None,
        }
    }
}

/// Propagation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Longest chain of connections a cascade may follow from its origin.
    /// Connections that would exceed it are rejected.
    pub max_cascade_depth: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_cascade_depth: DEFAULT_MAX_CASCADE_DEPTH,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config from the default location, returning defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            tracing::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the config as TOML, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {:?}", path))
    }

    fn validate(&self) -> Result<()> {
        if self.pipeline.max_cascade_depth == 0 {
            return Err(GadgetsError::Config(
                "pipeline.max_cascade_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
