//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io;

use console::{style, Term};

use crate::cli::orchestration::Confirm;
use crate::domain::Project;
use crate::error::{RelmError, Result};

pub mod formatter;

pub use formatter::{
    display_batch_summary, display_boundary_warning, display_error, display_projects,
    display_status, display_status_table, display_success, StatusRow,
};

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Accepts "y" or "yes" (case-insensitive). Default is "no" if the user
/// presses Enter, or when stdin is not a terminal.
pub fn confirm_action(prompt: &str) -> io::Result<bool> {
    let term = Term::stdout();
    term.write_str(&format!("\n{} (y/N): ", prompt))?;
    term.flush()?;

    let response = term.read_line()?.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

/// Release confirmation through the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, project: &Project, old_version: &str, new_version: &str) -> Result<bool> {
        let prompt = format!(
            "Release {} {} -> {}?",
            style(&project.name).bold(),
            old_version,
            style(new_version).green()
        );
        confirm_action(&prompt).map_err(|e| RelmError::prompt(e.to_string()))
    }
}
