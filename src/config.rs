//! Configuration System
//!
//! Layered configuration: built-in defaults, then the global file, then the
//! working-directory file, then `FSGUARD__*` environment variables. CLI flags are
//! applied on top by the binary.

use crate::logging::LoggingConfig;
use crate::tree::hasher::HashAlgorithm;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Default baseline location, relative to the working directory
pub const DEFAULT_BASELINE_FILE: &str = "baseline.json";
/// Default change log location, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "integrity_log.txt";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FsguardConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the baseline and the change log live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_baseline_file")]
    pub baseline_file: PathBuf,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_baseline_file() -> PathBuf {
    PathBuf::from(DEFAULT_BASELINE_FILE)
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            baseline_file: default_baseline_file(),
            log_file: default_log_file(),
        }
    }
}

/// How trees are scanned and hashed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Algorithm for new baselines. Checks always use the baseline's own algorithm.
    #[serde(default)]
    pub algorithm: HashAlgorithm,

    #[serde(default)]
    pub follow_symlinks: bool,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl ScanConfig {
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            ignore_patterns: self.ignore_patterns.clone(),
            max_depth: self.max_depth,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Storage(String),
    Scan(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Scan(msg) => write!(f, "Scan: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FsguardConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.storage.baseline_file.as_os_str().is_empty() {
            errors.push(ValidationError::Storage(
                "Baseline file path cannot be empty".to_string(),
            ));
        }
        if self.storage.log_file.as_os_str().is_empty() {
            errors.push(ValidationError::Storage(
                "Log file path cannot be empty".to_string(),
            ));
        }
        if normalize_storage_path(&self.storage.baseline_file)
            == normalize_storage_path(&self.storage.log_file)
        {
            errors.push(ValidationError::Storage(
                "Baseline file and log file must be different paths".to_string(),
            ));
        }
        if self.scan.max_depth == Some(0) {
            errors.push(ValidationError::Scan(
                "max_depth must be at least 1".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Absolute form of `path` with `.` and `..` folded, without touching the filesystem.
fn normalize_storage_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
