//! fsguard CLI Binary
//!
//! Command-line interface for baseline creation and integrity checks.

use clap::Parser;
use fsguard::cli::{map_error, Cli, RunContext, EXIT_FAILURE};
use fsguard::config::{ConfigLoader, FsguardConfig};
use fsguard::error::ApiError;
use fsguard::logging::{init_logging, LoggingConfig};
use std::io::IsTerminal;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => apply_overrides(config, &cli),
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    };

    // Initialize logging early
    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_FAILURE);
    }

    info!("fsguard starting");

    let color = !cli.no_color && std::io::stdout().is_terminal();
    let context = match RunContext::new(config, color) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!(exit_code = output.exit_code, "Command completed");
            if !output.text.is_empty() {
                println!("{}", output.text);
            }
            process::exit(output.exit_code);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    }
}

/// Load config from `--config`, or from the layered sources rooted at the current directory
fn load_config(cli: &Cli) -> Result<FsguardConfig, ApiError> {
    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| ApiError::ConfigError(format!("Cannot read current directory: {}", e)))?;
            ConfigLoader::load(&cwd)?
        }
    };
    Ok(config)
}

/// CLI flags take priority over every config source
fn apply_overrides(mut config: FsguardConfig, cli: &Cli) -> FsguardConfig {
    if let Some(ref path) = cli.baseline_file {
        config.storage.baseline_file = path.clone();
    }
    if let Some(ref path) = cli.log_file {
        config.storage.log_file = path.clone();
    }
    if let Some(algorithm) = cli.algorithm {
        config.scan.algorithm = algorithm;
    }
    if cli.follow_symlinks {
        config.scan.follow_symlinks = true;
    }
    config.scan.ignore_patterns.extend(cli.ignore.iter().cloned());
    config
}

/// Build logging configuration from CLI args and the loaded config
fn build_logging_config(cli: &Cli, config: &FsguardConfig) -> LoggingConfig {
    // Diagnostics stay off unless asked for
    if !cli.verbose && cli.log_level.is_none() {
        return LoggingConfig {
            level: "off".to_string(),
            ..LoggingConfig::default()
        };
    }

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.diag_file {
        logging.file = Some(file.clone());
    }
    if cli.no_color {
        logging.color = false;
    }
    logging
}
