//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

use crate::config::{DEFAULT_BASELINE_FILE, DEFAULT_LOG_FILE};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("storage.baseline_file", DEFAULT_BASELINE_FILE)?
        .set_default("storage.log_file", DEFAULT_LOG_FILE)?
        .set_default("scan.algorithm", "sha256")?
        .set_default("scan.follow_symlinks", false)
}
