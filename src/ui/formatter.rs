//! Pure formatting functions for UI output.
//!
//! Status lines go to stdout, errors to stderr. Report bodies (changelog,
//! tag lists) are written by the caller without decoration.

use console::style;

use crate::git_ops::TagOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Summary line for a finished tag task.
pub fn tag_summary(outcome: &TagOutcome) -> String {
    let kind = if outcome.signed { "signed tag" } else { "tag" };

    if outcome.pushed_to.is_empty() {
        format!("Created {} {}", kind, outcome.tag)
    } else {
        format!(
            "Created {} {} and pushed to {}",
            kind,
            outcome.tag,
            outcome.pushed_to.join(", ")
        )
    }
}

/// Display the result of tagging.
pub fn display_tag_outcome(outcome: &TagOutcome) {
    display_success(&tag_summary(outcome));
}
