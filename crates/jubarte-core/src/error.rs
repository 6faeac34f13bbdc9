//! Core error types for jubarte-core.
//!
//! Each concern (scheduling, export, storage, configuration) owns a
//! thiserror enum; [`CoreError`] unifies them for the orchestrating layer.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for jubarte-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Scheduling errors
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Calendar export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Storage errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An item with the same title is already registered
    #[error("An item with title '{0}' already exists")]
    DuplicateTitle(String),

    /// Study item titles must not be blank
    #[error("Item title must not be empty")]
    InvalidTitle,

    /// No item (or no review for it) with the given id
    #[error("Item not found: {0}")]
    ItemNotFound(String),
}

/// Errors raised by the scheduling strategies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Outcome label outside `again|hard|good|easy`
    #[error("Invalid review result '{0}': expected one of again, hard, good, easy")]
    InvalidResult(String),

    /// Fixed-horizon records are never rescheduled
    #[error("Review for item '{item_id}' uses a fixed schedule and cannot be updated")]
    NotAdaptive { item_id: String },
}

/// Errors raised while producing a calendar document.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A record has no scheduled timestamp
    #[error("Review for item '{item_id}' has no scheduled date")]
    MissingDate { item_id: String },

    /// Writing or renaming the output failed
    #[error("Failed to write calendar to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read or write the data file
    #[error("Storage IO failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file content is not a valid store document
    #[error("Invalid data file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No home directory to derive the default location from
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
