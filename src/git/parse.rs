//! Parsers for raw `git` command output.

use crate::git::CommitRecord;

/// Separator between fields, and terminator of each record, in the log format.
pub const FIELD_DELIMITER: &str = "|||";

/// `--format` argument that produces the blob [`parse_log_records`] reads.
pub const LOG_FORMAT: &str = "--format=tformat:%B|||%aN|||%aE|||";

/// Splits a log blob into (message, author, email) records.
///
/// Fields are taken three at a time. A blob with a stray delimiter inside a
/// message shifts every later record; that is not detected here. Missing
/// trailing fields come back empty.
pub fn parse_log_records(blob: &str) -> Vec<CommitRecord> {
    let fields: Vec<&str> = blob.split(FIELD_DELIMITER).collect();

    fields
        .chunks(3)
        .map(|chunk| CommitRecord {
            message: chunk.first().copied().unwrap_or_default().to_string(),
            author: chunk.get(1).copied().unwrap_or_default().to_string(),
            email: chunk.get(2).copied().unwrap_or_default().to_string(),
        })
        .filter(|record| {
            !(record.message.trim().is_empty()
                && record.author.is_empty()
                && record.email.is_empty())
        })
        .collect()
}

/// Non-blank lines of a commit message, in order.
pub fn message_lines(message: &str) -> impl Iterator<Item = &str> {
    message.lines().filter(|line| !line.trim().is_empty())
}

/// One commit hash per non-empty line.
pub fn parse_hash_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Symbolic names from `git name-rev` output (`<hash> <name>` per line), in order.
pub fn parse_name_rev(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let first = fields.next()?;
            Some(fields.next().unwrap_or(first).to_string())
        })
        .collect()
}
