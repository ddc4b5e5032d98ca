//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use console::Term;

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_status, display_success, display_tag_outcome, tag_summary,
};

/// Prompts for a tag annotation message on the terminal.
///
/// Returns the trimmed input; an empty string means "no message".
pub fn prompt_tag_message() -> Result<String> {
    let term = Term::stdout();
    term.write_line("Tag (release) message:")?;
    term.write_str("> ")?;
    let input = term.read_line()?;
    Ok(normalize_message(&input))
}

/// Trims a message; returns `None` when nothing is left.
pub fn non_empty_message(message: &str) -> Option<String> {
    let message = normalize_message(message);
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

fn normalize_message(input: &str) -> String {
    input.trim().to_string()
}
