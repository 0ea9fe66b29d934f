//! Core error types for fuelday-core.
//!
//! Catalog problems are fatal for a run; validation problems must be
//! caught before the engine is invoked. Degraded data states (no safe
//! foods, no matching template) are not errors at all: they are reported
//! through meal notes.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fuelday-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog-related errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading the external food/template catalogs.
///
/// A missing or malformed catalog is fatal for the planning run that needed
/// it; there is no partial plan on failure.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("Failed to read catalog at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON of the expected shape
    #[error("Failed to parse catalog at {path}: {source}")]
    ParseFailed {
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A training session whose end does not come after its start
    #[error("Invalid session '{label}': end ({end}) must be greater than start ({start})")]
    InvalidTimeRange {
        label: String,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// A value outside its enumerated set
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
