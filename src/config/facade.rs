//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::FsguardConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment.
    ///
    /// `working_dir` is where `fsguard.toml` is looked up.
    pub fn load(working_dir: &Path) -> Result<FsguardConfig, ConfigError> {
        MergeService::load(working_dir)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<FsguardConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> FsguardConfig {
        FsguardConfig::default()
    }
}
