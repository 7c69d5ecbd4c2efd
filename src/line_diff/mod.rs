use crate::error::{DiffError, Result, Side};
use crate::myers::{self, Edit};
use crate::{DiffLine, DiffResult, DiffStats, DiffType};
use log::debug;

/// Split text into lines on `\n`.
///
/// Empty text has no lines. Otherwise every `\n` separates two lines, so a trailing
/// newline yields a final empty line and joining with `\n` gives the input back.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Compute the line-level diff between two texts.
///
/// Each edit of the minimal script becomes one `DiffLine`: equal lines advance both
/// counters, removed lines only the original one, added lines only the modified one.
pub fn calculate_diff(original: &str, modified: &str) -> DiffResult {
    let old_lines = split_lines(original);
    let new_lines = split_lines(modified);

    let edits = myers::diff(&old_lines, &new_lines);
    debug!(
        "line diff: {} original lines, {} modified lines, edit distance {}",
        old_lines.len(),
        new_lines.len(),
        myers::edit_distance(&edits)
    );

    let mut lines = Vec::with_capacity(edits.len());
    let mut original_line = 1;
    let mut new_line = 1;

    for (idx, edit) in edits.iter().enumerate() {
        let line_number = idx + 1;
        let line = match *edit {
            Edit::Equal { old, .. } => {
                let line = DiffLine {
                    line_number,
                    content: old_lines[old].to_string(),
                    diff_type: DiffType::Unchanged,
                    original_line_number: Some(original_line),
                    new_line_number: Some(new_line),
                };
                original_line += 1;
                new_line += 1;
                line
            }
            Edit::Delete { old } => {
                let line = DiffLine {
                    line_number,
                    content: old_lines[old].to_string(),
                    diff_type: DiffType::Removed,
                    original_line_number: Some(original_line),
                    new_line_number: None,
                };
                original_line += 1;
                line
            }
            Edit::Insert { new } => {
                let line = DiffLine {
                    line_number,
                    content: new_lines[new].to_string(),
                    diff_type: DiffType::Added,
                    original_line_number: None,
                    new_line_number: Some(new_line),
                };
                new_line += 1;
                line
            }
        };
        lines.push(line);
    }

    let stats = DiffStats::from_lines(&lines);
    DiffResult { lines, stats }
}

/// Check that raw input for one side is UTF-8.
pub fn decode_input(bytes: &[u8], side: Side) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|source| DiffError::InvalidUtf8 { side, source })
}

/// Validate raw bytes as UTF-8 and diff them.
pub fn calculate_diff_bytes(original: &[u8], modified: &[u8]) -> Result<DiffResult> {
    let original = decode_input(original, Side::Original)?;
    let modified = decode_input(modified, Side::Modified)?;
    Ok(calculate_diff(original, modified))
}

/// Reject inputs with more than `limit` lines on either side. A limit of 0 disables the check.
///
/// The diff itself never bounds its input; callers that accept untrusted text run this first.
pub fn check_line_limit(original: &str, modified: &str, limit: usize) -> Result<()> {
    if limit == 0 {
        return Ok(());
    }

    for (side, text) in [(Side::Original, original), (Side::Modified, modified)] {
        let lines = split_lines(text).len();
        if lines > limit {
            return Err(DiffError::InputTooLarge { side, lines, limit });
        }
    }

    Ok(())
}
