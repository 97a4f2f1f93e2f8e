//! Error handling for gadgets-rs
//!
//! This module defines the crate-level error type and a Result alias.
//! Subsystems keep their own error enums (`GraphError`, `PipelineError`);
//! they convert into [`GadgetsError`] at the crate boundary (config loading
//! and [`crate::chain::ChainRun`]).

use crate::pipeline::PipelineError;
use thiserror::Error;

/// Main error type for gadgets-rs operations
#[derive(Error, Debug)]
pub enum GadgetsError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline errors (unknown gadgets, ports, classes, rejected edges)
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<GadgetsError>,
    },
}

impl GadgetsError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        GadgetsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True if this error, or the error it wraps, is a rejected cycle.
    pub fn is_cycle(&self) -> bool {
        match self {
            GadgetsError::Pipeline(err) => err.is_cycle(),
            GadgetsError::WithContext { source, .. } => source.is_cycle(),
            _ => false,
        }
    }
}

/// Result type alias for gadgets-rs operations
pub type Result<T> = std::result::Result<T, GadgetsError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<GadgetsError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
