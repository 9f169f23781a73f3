//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Exit status for a successful command
pub const EXIT_OK: i32 = 0;
/// Exit status for any fatal error
pub const EXIT_FAILURE: i32 = 1;
/// Exit status for `check --exit-code` when changes were found
pub const EXIT_CHANGES: i32 = 2;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::NotFound(path) => format!("Error: directory does not exist: {}", path.display()),
        ApiError::CorruptBaseline { path, message } => format!(
            "Error: baseline {} could not be read ({}). Recreate it with `fsguard baseline <DIR>`.",
            path.display(),
            message
        ),
        other => format!("Error: {}", other),
    }
}
