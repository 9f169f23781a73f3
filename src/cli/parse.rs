//! CLI parse: clap types for fsguard. No behavior; definitions only.

use crate::tree::hasher::HashAlgorithm;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fsguard - content-hash baselines and change detection
#[derive(Parser, Debug)]
#[command(name = "fsguard", version)]
#[command(about = "Record a hash baseline of a directory tree and detect new, modified and deleted files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (replaces fsguard.toml and the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Baseline file location (default: baseline.json)
    #[arg(long, global = true)]
    pub baseline_file: Option<PathBuf>,

    /// Change log location (default: integrity_log.txt)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Hash algorithm for new baselines
    #[arg(long, global = true, value_enum)]
    pub algorithm: Option<HashAlgorithm>,

    /// Follow symbolic links while scanning
    #[arg(long, global = true)]
    pub follow_symlinks: bool,

    /// Skip paths matching this component name or root-relative prefix (repeatable)
    #[arg(long = "ignore", global = true, value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable diagnostic logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Diagnostic log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Diagnostic log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Diagnostic log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Diagnostic log file (when --log-output file)
    #[arg(long, global = true)]
    pub diag_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Scan a directory and save its hashes as the new baseline (overwrites any existing one)
    Baseline {
        /// Directory to record
        dir: PathBuf,
    },
    /// Compare a directory against the saved baseline
    Check {
        /// Directory to check
        dir: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Exit with status 2 when changes are found
        #[arg(long)]
        exit_code: bool,
    },
    /// Print the saved baseline
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the change log
    Log {
        /// Only the last N entries
        #[arg(long)]
        tail: Option<usize>,
    },
    /// Print the effective configuration as TOML
    Config,
    /// Interactive menu: create a baseline or check integrity
    Menu,
}

/// Report format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
