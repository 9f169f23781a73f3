//! Error types for fsguard.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors (baseline file and change log)
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No baseline found at {0}")]
    MissingBaseline(PathBuf),

    #[error("Failed to parse baseline {path}: {message}")]
    Serialization { path: PathBuf, message: String },

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors surfaced by the core entry points and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Directory does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("No baseline found at {0}. Create one first with `fsguard baseline <DIR>`.")]
    MissingBaseline(PathBuf),

    #[error("Baseline {path} is corrupt: {message}")]
    CorruptBaseline { path: PathBuf, message: String },

    #[error("Storage error: {0}")]
    StorageError(StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Interactive input failed: {0}")]
    Interaction(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::MissingBaseline(path) => ApiError::MissingBaseline(path),
            StorageError::Serialization { path, message } => {
                ApiError::CorruptBaseline { path, message }
            }
            other => ApiError::StorageError(other),
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
