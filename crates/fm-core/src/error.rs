//! Error types for fm-core

use thiserror::Error;

/// Core error type for Foreman
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: IO error with file path context
    #[error("[E003] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E004: YAML parse error
    #[error("[E004] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// E005: A record returned by a connector is malformed
    #[error("[E005] Invalid {kind} record {id}: {reason}")]
    InvalidRecord {
        kind: &'static str,
        id: i64,
        reason: String,
    },

    /// E006: Epoch timestamp outside the representable range
    #[error("[E006] Timestamp out of range: {seconds}")]
    TimestampOutOfRange { seconds: i64 },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
