use crate::char_diff::{DEFAULT_CHAR_DIFF_THRESHOLD, calculate_char_diff, should_show_char_diff};
use crate::{DiffLine, DiffType, LinePair, LineWithSegments, SideBySideLines};
use log::debug;

/// Attach character segments to a removed/added pair when the lines are similar enough.
fn annotate_pair(
    removed: &DiffLine,
    added: &DiffLine,
    enable_char_diff: bool,
    threshold: f64,
) -> (LineWithSegments, LineWithSegments) {
    if enable_char_diff && should_show_char_diff(&removed.content, &added.content, threshold) {
        let diff = calculate_char_diff(&removed.content, &added.content);
        (
            LineWithSegments {
                line: removed.clone(),
                segments: Some(diff.original_segments),
            },
            LineWithSegments {
                line: added.clone(),
                segments: Some(diff.modified_segments),
            },
        )
    } else {
        (
            LineWithSegments::plain(removed.clone()),
            LineWithSegments::plain(added.clone()),
        )
    }
}

/// Length of the run of `diff_type` lines starting at `start`.
fn run_len(lines: &[DiffLine], start: usize, diff_type: DiffType) -> usize {
    lines[start..]
        .iter()
        .take_while(|l| l.diff_type == diff_type)
        .count()
}

/// Annotate lines for the unified view, using the default similarity threshold.
///
/// See [`pair_for_unified_view_with_threshold`].
pub fn pair_for_unified_view(lines: &[DiffLine], enable_char_diff: bool) -> Vec<LineWithSegments> {
    pair_for_unified_view_with_threshold(lines, enable_char_diff, DEFAULT_CHAR_DIFF_THRESHOLD)
}

/// Annotate lines for the unified view.
///
/// Every maximal run of removed lines is matched with the run of added lines that
/// directly follows it, position by position. Lines keep their input order, so the
/// output has exactly one entry per input line.
pub fn pair_for_unified_view_with_threshold(
    lines: &[DiffLine],
    enable_char_diff: bool,
    threshold: f64,
) -> Vec<LineWithSegments> {
    let mut result = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        // Anything outside a removed run passes through untouched
        if lines[i].diff_type != DiffType::Removed {
            result.push(LineWithSegments::plain(lines[i].clone()));
            i += 1;
            continue;
        }

        // Collect the removed run, then the added run right behind it
        let removed_len = run_len(lines, i, DiffType::Removed);
        let added_start = i + removed_len;
        let added_len = if added_start < lines.len() {
            run_len(lines, added_start, DiffType::Added)
        } else {
            0
        };

        let removed = &lines[i..added_start];
        let added = &lines[added_start..added_start + added_len];

        let mut removed_out: Vec<LineWithSegments> = Vec::with_capacity(removed.len());
        let mut added_out: Vec<LineWithSegments> = Vec::with_capacity(added.len());

        // Pair by position; the longer run's tail stays unannotated
        for j in 0..removed.len().max(added.len()) {
            match (removed.get(j), added.get(j)) {
                (Some(r), Some(a)) => {
                    let (r, a) = annotate_pair(r, a, enable_char_diff, threshold);
                    removed_out.push(r);
                    added_out.push(a);
                }
                (Some(r), None) => removed_out.push(LineWithSegments::plain(r.clone())),
                (None, Some(a)) => added_out.push(LineWithSegments::plain(a.clone())),
                (None, None) => {}
            }
        }

        result.extend(removed_out);
        result.extend(added_out);
        i = added_start + added_len;
    }

    debug!("unified pairing: {} lines", result.len());
    result
}

/// Split lines into two unaligned columns, using the default similarity threshold.
///
/// See [`pair_for_side_by_side_view_with_threshold`].
pub fn pair_for_side_by_side_view(lines: &[DiffLine], enable_char_diff: bool) -> SideBySideLines {
    pair_for_side_by_side_view_with_threshold(lines, enable_char_diff, DEFAULT_CHAR_DIFF_THRESHOLD)
}

/// Split lines into an original column (everything but added lines) and a modified
/// column (everything but removed lines).
///
/// Rows are not aligned. Character segments are attached only where the same index
/// holds a removed line on the left and an added line on the right.
pub fn pair_for_side_by_side_view_with_threshold(
    lines: &[DiffLine],
    enable_char_diff: bool,
    threshold: f64,
) -> SideBySideLines {
    let mut original: Vec<LineWithSegments> = lines
        .iter()
        .filter(|l| l.diff_type != DiffType::Added)
        .cloned()
        .map(LineWithSegments::plain)
        .collect();
    let mut modified: Vec<LineWithSegments> = lines
        .iter()
        .filter(|l| l.diff_type != DiffType::Removed)
        .cloned()
        .map(LineWithSegments::plain)
        .collect();

    if enable_char_diff {
        for (left, right) in original.iter_mut().zip(modified.iter_mut()) {
            if left.line.diff_type == DiffType::Removed
                && right.line.diff_type == DiffType::Added
                && should_show_char_diff(&left.line.content, &right.line.content, threshold)
            {
                let diff = calculate_char_diff(&left.line.content, &right.line.content);
                left.segments = Some(diff.original_segments);
                right.segments = Some(diff.modified_segments);
            }
        }
    }

    SideBySideLines { original, modified }
}

/// Build row-aligned pairs, using the default similarity threshold.
///
/// See [`pair_lines_for_side_by_side_with_threshold`].
pub fn pair_lines_for_side_by_side(lines: &[DiffLine], enable_char_diff: bool) -> Vec<LinePair> {
    pair_lines_for_side_by_side_with_threshold(lines, enable_char_diff, DEFAULT_CHAR_DIFF_THRESHOLD)
}

/// Tracks each side's own line numbering during the aligned scan.
struct SideCounters {
    original: usize,
    modified: usize,
}

impl SideCounters {
    fn original(&mut self, line: &DiffLine) -> DiffLine {
        self.original += 1;
        DiffLine {
            line_number: self.original,
            ..line.clone()
        }
    }

    fn modified(&mut self, line: &DiffLine) -> DiffLine {
        self.modified += 1;
        DiffLine {
            line_number: self.modified,
            ..line.clone()
        }
    }
}

/// Build row-aligned pairs for the side-by-side view.
///
/// Lines present on both sides become one row. A removed run and the added run right
/// after it are matched position by position, with `None` on the side that runs out
/// first. Each side's `line_number` is renumbered to that side's own numbering.
pub fn pair_lines_for_side_by_side_with_threshold(
    lines: &[DiffLine],
    enable_char_diff: bool,
    threshold: f64,
) -> Vec<LinePair> {
    let mut pairs = Vec::with_capacity(lines.len());
    let mut counters = SideCounters {
        original: 0,
        modified: 0,
    };
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        match line.diff_type {
            // Present on both sides: one full row
            DiffType::Unchanged | DiffType::Modified => {
                pairs.push(LinePair {
                    original: Some(LineWithSegments::plain(counters.original(line))),
                    modified: Some(LineWithSegments::plain(counters.modified(line))),
                });
                i += 1;
            }
            // Insertion with no removed run before it
            DiffType::Added => {
                pairs.push(LinePair {
                    original: None,
                    modified: Some(LineWithSegments::plain(counters.modified(line))),
                });
                i += 1;
            }
            DiffType::Removed => {
                let removed_len = run_len(lines, i, DiffType::Removed);
                let added_start = i + removed_len;
                let added_len = if added_start < lines.len() {
                    run_len(lines, added_start, DiffType::Added)
                } else {
                    0
                };

                // Pad whichever side runs out first with None
                for j in 0..removed_len.max(added_len) {
                    let removed = (j < removed_len).then(|| counters.original(&lines[i + j]));
                    let added =
                        (j < added_len).then(|| counters.modified(&lines[added_start + j]));

                    let pair = match (removed, added) {
                        (Some(r), Some(a)) => {
                            let (r, a) = annotate_pair(&r, &a, enable_char_diff, threshold);
                            LinePair {
                                original: Some(r),
                                modified: Some(a),
                            }
                        }
                        (r, a) => LinePair {
                            original: r.map(LineWithSegments::plain),
                            modified: a.map(LineWithSegments::plain),
                        },
                    };
                    pairs.push(pair);
                }

                i = added_start + added_len;
            }
        }
    }

    debug!(
        "side-by-side pairing: {} lines into {} rows",
        lines.len(),
        pairs.len()
    );
    pairs
}
