//! Interactive menu: pick an action, then a directory.

use crate::cli::parse::{Commands, OutputFormat};
use crate::error::ApiError;
use dialoguer::{Input, Select};
use std::path::{Path, PathBuf};

/// Entries offered by `fsguard menu`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateBaseline,
    CheckIntegrity,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 3] = [
        MenuChoice::CreateBaseline,
        MenuChoice::CheckIntegrity,
        MenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::CreateBaseline => "Create baseline (first time setup)",
            MenuChoice::CheckIntegrity => "Check integrity (compare with baseline)",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Map a menu choice and target directory to the command it stands for.
///
/// `None` means the user chose to exit.
pub fn command_for(choice: MenuChoice, target: &Path) -> Option<Commands> {
    match choice {
        MenuChoice::CreateBaseline => Some(Commands::Baseline {
            dir: target.to_path_buf(),
        }),
        MenuChoice::CheckIntegrity => Some(Commands::Check {
            dir: target.to_path_buf(),
            format: OutputFormat::Text,
            exit_code: false,
        }),
        MenuChoice::Exit => None,
    }
}

/// Ask for an action and, unless the user exits, a directory.
pub fn prompt() -> Result<Option<Commands>, ApiError> {
    let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
    let selection = Select::new()
        .with_prompt("fsguard")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| ApiError::Interaction(e.to_string()))?;

    let choice = MenuChoice::ALL[selection];
    if choice == MenuChoice::Exit {
        return Ok(None);
    }

    let target: String = Input::new()
        .with_prompt("Directory to monitor")
        .interact_text()
        .map_err(|e| ApiError::Interaction(e.to_string()))?;

    Ok(command_for(choice, &PathBuf::from(target.trim())))
}
