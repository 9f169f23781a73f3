//! CLI route: single route table and run context. Dispatches to the core and presentation.

use crate::api::IntegrityChecker;
use crate::cli::interactive;
use crate::cli::output::{EXIT_CHANGES, EXIT_OK};
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation;
use crate::config::FsguardConfig;
use crate::error::ApiError;
use tracing::debug;

/// What a command printed and how the process should exit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

impl CommandOutput {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit_code: EXIT_OK,
        }
    }
}

/// Runtime context for CLI execution: effective config plus the core checker.
pub struct RunContext {
    config: FsguardConfig,
    checker: IntegrityChecker,
    color: bool,
}

impl RunContext {
    /// Create a run context from an already merged configuration.
    pub fn new(config: FsguardConfig, color: bool) -> Result<Self, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        let checker = IntegrityChecker::new(&config);
        Ok(Self {
            config,
            checker,
            color,
        })
    }

    pub fn checker(&self) -> &IntegrityChecker {
        &self.checker
    }

    /// Execute a parsed command.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        debug!(?command, "Dispatching command");
        match command {
            Commands::Baseline { dir } => {
                let outcome = self.checker.create_baseline(dir)?;
                Ok(CommandOutput::ok(presentation::format_baseline_created(
                    &outcome, self.color,
                )))
            }
            Commands::Check {
                dir,
                format,
                exit_code,
            } => {
                let outcome = self.checker.check_integrity(dir)?;
                let text = match format {
                    OutputFormat::Text => presentation::format_check_text(&outcome, self.color),
                    OutputFormat::Json => presentation::format_check_json(&outcome)?,
                };
                let code = if *exit_code && outcome.has_changes() {
                    EXIT_CHANGES
                } else {
                    EXIT_OK
                };
                Ok(CommandOutput {
                    text,
                    exit_code: code,
                })
            }
            Commands::Show { format } => {
                let baseline = self.checker.show_baseline()?;
                let text = match format {
                    OutputFormat::Text => presentation::format_baseline_table(&baseline),
                    OutputFormat::Json => presentation::format_baseline_json(&baseline)?,
                };
                Ok(CommandOutput::ok(text))
            }
            Commands::Log { tail } => {
                let lines = self.checker.change_log().read_lines()?;
                Ok(CommandOutput::ok(presentation::format_log_lines(
                    &lines, *tail,
                )))
            }
            Commands::Config => {
                let text = toml::to_string_pretty(&self.config).map_err(|e| {
                    ApiError::ConfigError(format!("Failed to render configuration: {}", e))
                })?;
                Ok(CommandOutput::ok(text.trim_end()))
            }
            Commands::Menu => match interactive::prompt()? {
                Some(next) => self.execute(&next),
                None => Ok(CommandOutput::ok("Goodbye.")),
            },
        }
    }
}
