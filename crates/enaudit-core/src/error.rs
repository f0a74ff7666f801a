//! Core error types for enaudit-core.
//!
//! This module defines the error hierarchy using thiserror. The two
//! calculator failure modes (`InvalidInput`, `MissingLookup`) are raised
//! synchronously; callers either validate before invoking or surface the
//! message to the user and re-prompt.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for enaudit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A geometric or electrical input violates a stated invariant
    /// (non-positive area, negative quantity, out-of-range factor).
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// No illuminance requirement is registered for a room kind.
    #[error("No illuminance requirement registered for room kind '{room_kind}'")]
    MissingLookup { room_kind: String },

    /// An entity referenced by id does not exist in the building store.
    #[error("Unknown {entity} id: {id}")]
    UnknownId { entity: &'static str, id: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
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
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
