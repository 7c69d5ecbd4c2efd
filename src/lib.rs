pub mod char_diff;
pub mod cli;
pub mod context;
pub mod error;
pub mod line_diff;
pub mod myers;
pub mod pairing;

use serde::{Deserialize, Serialize};

pub use char_diff::{
    CharDiff, DEFAULT_CHAR_DIFF_THRESHOLD, calculate_char_diff, should_show_char_diff,
};
pub use context::{
    CollapsedBlock, DEFAULT_CONTEXT_LINES, SideBySideRow, UnifiedCollapsedBlock, UnifiedRow,
    apply_context_filter, apply_context_filter_unified, expand_collapsed,
    expand_collapsed_unified,
};
pub use error::{DiffError, Side};
pub use line_diff::{calculate_diff, calculate_diff_bytes, check_line_limit};
pub use pairing::{pair_for_side_by_side_view, pair_for_unified_view, pair_lines_for_side_by_side};

/// Change class of a single diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffType {
    Added,
    Removed,
    Modified,
    Unchanged,
}

/// One line of diff output.
///
/// `line_number` is the global 1-based position in the emitted sequence. Inside a
/// [`LinePair`] it is instead the line number within that side's own text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    pub line_number: usize,
    pub content: String,
    #[serde(rename = "type")]
    pub diff_type: DiffType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_line_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line_number: Option<usize>,
}

impl DiffLine {
    pub fn is_unchanged(&self) -> bool {
        self.diff_type == DiffType::Unchanged
    }
}

/// Change class of a character run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Added,
    Removed,
    Unchanged,
}

/// A contiguous run of characters sharing one change class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharSegment {
    pub text: String,
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
}

impl CharSegment {
    pub fn new(text: impl Into<String>, segment_type: SegmentType) -> Self {
        Self {
            text: text.into(),
            segment_type,
        }
    }
}

/// Aggregate counts over a set of diff lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
    /// Percentage (0-100) of unchanged lines over all lines.
    pub similarity: f64,
}

impl DiffStats {
    /// Tally the given lines. An empty slice counts as fully similar.
    pub fn from_lines(lines: &[DiffLine]) -> Self {
        let mut stats = DiffStats {
            added: 0,
            removed: 0,
            modified: 0,
            unchanged: 0,
            similarity: 100.0,
        };

        for line in lines {
            match line.diff_type {
                DiffType::Added => stats.added += 1,
                DiffType::Removed => stats.removed += 1,
                DiffType::Modified => stats.modified += 1,
                DiffType::Unchanged => stats.unchanged += 1,
            }
        }

        if !lines.is_empty() {
            stats.similarity = (stats.unchanged as f64 / lines.len() as f64) * 100.0;
        }

        stats
    }
}

/// Output of the line diff: the typed lines plus their tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    pub lines: Vec<DiffLine>,
    pub stats: DiffStats,
}

impl DiffResult {
    /// Replay the edit script, keeping lines that exist in the original text.
    pub fn reconstruct_original(&self) -> String {
        self.replay(|t| matches!(t, DiffType::Unchanged | DiffType::Removed | DiffType::Modified))
    }

    /// Replay the edit script, keeping lines that exist in the modified text.
    pub fn reconstruct_modified(&self) -> String {
        self.replay(|t| matches!(t, DiffType::Unchanged | DiffType::Added | DiffType::Modified))
    }

    fn replay(&self, keep: impl Fn(DiffType) -> bool) -> String {
        self.lines
            .iter()
            .filter(|l| keep(l.diff_type))
            .map(|l| l.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A diff line optionally annotated with character-level highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWithSegments {
    pub line: DiffLine,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<CharSegment>>,
}

impl LineWithSegments {
    pub fn plain(line: DiffLine) -> Self {
        Self {
            line,
            segments: None,
        }
    }
}

/// One row of the aligned side-by-side view. `None` renders as a blank cell.
/// Rows produced by this crate never have both sides empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePair {
    pub original: Option<LineWithSegments>,
    pub modified: Option<LineWithSegments>,
}

impl LinePair {
    /// Anything other than an unchanged line on both sides.
    pub fn is_changed(&self) -> bool {
        let unchanged = |side: &Option<LineWithSegments>| {
            side.as_ref().is_some_and(|l| l.line.is_unchanged())
        };
        !(unchanged(&self.original) && unchanged(&self.modified))
    }
}

/// Output of the filter-based side-by-side pairing. The two columns are not row-aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBySideLines {
    pub original: Vec<LineWithSegments>,
    pub modified: Vec<LineWithSegments>,
}

/// The core's slice of the comparison options. Text normalization happens upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiffOptions {
    pub enable_char_diff: bool,
    /// Rows of context kept around each change; `None` disables collapsing.
    pub context_lines: Option<usize>,
    pub char_diff_threshold: f64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            enable_char_diff: true,
            context_lines: Some(DEFAULT_CONTEXT_LINES),
            char_diff_threshold: DEFAULT_CHAR_DIFF_THRESHOLD,
        }
    }
}

/// Everything a viewer needs for one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    pub result: DiffResult,
    pub unified: Vec<UnifiedRow>,
    pub side_by_side: Vec<SideBySideRow>,
}

/// Run the whole pipeline: line diff, both pairings and optional context collapsing.
pub fn calculate_diff_with_options(
    original: &str,
    modified: &str,
    options: &DiffOptions,
) -> DiffReport {
    let result = calculate_diff(original, modified);
    let threshold = options.char_diff_threshold;

    let unified_lines = pairing::pair_for_unified_view_with_threshold(
        &result.lines,
        options.enable_char_diff,
        threshold,
    );
    let pairs = pairing::pair_lines_for_side_by_side_with_threshold(
        &result.lines,
        options.enable_char_diff,
        threshold,
    );

    let (unified, side_by_side) = match options.context_lines {
        Some(context_lines) => (
            apply_context_filter_unified(&unified_lines, context_lines),
            apply_context_filter(&pairs, context_lines),
        ),
        None => (
            unified_lines.into_iter().map(UnifiedRow::Line).collect(),
            pairs.into_iter().map(SideBySideRow::Pair).collect(),
        ),
    };

    DiffReport {
        result,
        unified,
        side_by_side,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_empty_lines_is_fully_similar() {
        let stats = DiffStats::from_lines(&[]);
        assert_eq!(stats.added + stats.removed + stats.unchanged, 0);
        assert_eq!(stats.similarity, 100.0);
    }

    #[test]
    fn pair_with_missing_side_is_changed() {
        let line = DiffLine {
            line_number: 1,
            content: "a".to_string(),
            diff_type: DiffType::Unchanged,
            original_line_number: Some(1),
            new_line_number: Some(1),
        };
        let both = LinePair {
            original: Some(LineWithSegments::plain(line.clone())),
            modified: Some(LineWithSegments::plain(line.clone())),
        };
        let one = LinePair {
            original: Some(LineWithSegments::plain(line)),
            modified: None,
        };
        assert!(!both.is_changed());
        assert!(one.is_changed());
    }

    #[test]
    fn pipeline_without_context_keeps_every_row() {
        let options = DiffOptions {
            context_lines: None,
            ..DiffOptions::default()
        };
        let report = calculate_diff_with_options("a\nb\nc", "a\nx\nc", &options);
        assert_eq!(report.unified.len(), 4);
        assert_eq!(report.side_by_side.len(), 3);
    }

    #[test]
    fn pipeline_collapses_long_unchanged_runs() {
        let original: Vec<String> = (0..40).map(|i| format!("line {i}")).collect();
        let mut modified = original.clone();
        modified[20] = "changed".to_string();
        let report = calculate_diff_with_options(
            &original.join("\n"),
            &modified.join("\n"),
            &DiffOptions::default(),
        );

        let collapsed = report
            .side_by_side
            .iter()
            .filter(|r| matches!(r, SideBySideRow::Collapsed(_)))
            .count();
        assert_eq!(collapsed, 2);
        let total: usize = report.side_by_side.iter().map(SideBySideRow::row_count).sum();
        assert_eq!(total, 40);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: DiffOptions = serde_json::from_str(r#"{"enableCharDiff": false}"#).unwrap();
        assert!(!options.enable_char_diff);
        assert_eq!(options.context_lines, Some(3));
        assert_eq!(options.char_diff_threshold, 0.6);
    }
}
