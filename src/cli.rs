//! CLI domain: parse, route, presentation and the interactive menu.
//! No scanning or diff logic here; everything goes through [`crate::api::IntegrityChecker`].

mod interactive;
mod output;
mod parse;
mod presentation;
mod route;

pub use interactive::{command_for, MenuChoice};
pub use output::{map_error, EXIT_CHANGES, EXIT_FAILURE, EXIT_OK};
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_baseline_created, format_baseline_json, format_baseline_table, format_check_json,
    format_check_text, format_log_lines,
};
pub use route::{CommandOutput, RunContext};
