use crate::{LinePair, LineWithSegments};
use log::debug;
use serde::Serialize;

/// Rows of unchanged context kept on each side of a change.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// A hidden run of unchanged rows in the side-by-side view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollapsedBlock {
    pub count: usize,
    pub start_original_line: Option<usize>,
    pub start_modified_line: Option<usize>,
    pub lines: Vec<LinePair>,
}

/// A hidden run of unchanged lines in the unified view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedCollapsedBlock {
    pub count: usize,
    pub start_line_number: usize,
    pub start_original_line: Option<usize>,
    pub start_new_line: Option<usize>,
    pub lines: Vec<LineWithSegments>,
}

/// A side-by-side row after context collapsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SideBySideRow {
    Pair(LinePair),
    Collapsed(CollapsedBlock),
}

impl SideBySideRow {
    /// Number of input rows this row stands for.
    pub fn row_count(&self) -> usize {
        match self {
            SideBySideRow::Pair(_) => 1,
            SideBySideRow::Collapsed(block) => block.count,
        }
    }
}

/// A unified row after context collapsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UnifiedRow {
    Line(LineWithSegments),
    Collapsed(UnifiedCollapsedBlock),
}

impl UnifiedRow {
    /// Number of input lines this row stands for.
    pub fn row_count(&self) -> usize {
        match self {
            UnifiedRow::Line(_) => 1,
            UnifiedRow::Collapsed(block) => block.count,
        }
    }
}

/// Decide which rows stay visible.
///
/// A row is visible when it lies within `context_lines` of a changed row. Without any
/// change the first and last `context_lines` rows are shown instead.
fn visible_rows(changed: &[bool], context_lines: usize) -> Vec<bool> {
    let n = changed.len();

    if !changed.iter().any(|&c| c) {
        return (0..n)
            .map(|i| i < context_lines || i + context_lines >= n)
            .collect();
    }

    // Distance to the nearest changed row, scanning forward then backward.
    let mut visible = vec![false; n];
    let mut last_change: Option<usize> = None;
    for i in 0..n {
        if changed[i] {
            last_change = Some(i);
        }
        if last_change.is_some_and(|c| i - c <= context_lines) {
            visible[i] = true;
        }
    }

    let mut next_change: Option<usize> = None;
    for i in (0..n).rev() {
        if changed[i] {
            next_change = Some(i);
        }
        if next_change.is_some_and(|c| c - i <= context_lines) {
            visible[i] = true;
        }
    }

    visible
}

/// Fold every run of invisible rows into one block.
fn fold_rows<T: Clone, R>(
    items: &[T],
    visible: &[bool],
    row: impl Fn(T) -> R,
    block: impl Fn(Vec<T>) -> R,
) -> Vec<R> {
    let mut rows = Vec::new();
    let mut i = 0;

    while i < items.len() {
        // Visible rows are copied one by one
        if visible[i] {
            rows.push(row(items[i].clone()));
            i += 1;
            continue;
        }

        // Swallow the whole hidden run into a single block
        let start = i;
        while i < items.len() && !visible[i] {
            i += 1;
        }
        rows.push(block(items[start..i].to_vec()));
    }

    rows
}

/// Collapse long unchanged stretches of the aligned side-by-side view.
///
/// Rows with no hidden neighbours come back as [`SideBySideRow::Pair`] in input order.
/// The sum of [`SideBySideRow::row_count`] over the result always equals `pairs.len()`.
pub fn apply_context_filter(pairs: &[LinePair], context_lines: usize) -> Vec<SideBySideRow> {
    let changed: Vec<bool> = pairs.iter().map(LinePair::is_changed).collect();
    let visible = visible_rows(&changed, context_lines);

    let rows = fold_rows(pairs, &visible, SideBySideRow::Pair, |hidden| {
        let first = &hidden[0];
        SideBySideRow::Collapsed(CollapsedBlock {
            count: hidden.len(),
            start_original_line: first.original.as_ref().map(|l| l.line.line_number),
            start_modified_line: first.modified.as_ref().map(|l| l.line.line_number),
            lines: hidden,
        })
    });

    debug!(
        "context filter: {} rows into {} ({} context lines)",
        pairs.len(),
        rows.len(),
        context_lines
    );
    rows
}

/// Collapse long unchanged stretches of the unified view.
///
/// The sum of [`UnifiedRow::row_count`] over the result always equals `lines.len()`.
pub fn apply_context_filter_unified(
    lines: &[LineWithSegments],
    context_lines: usize,
) -> Vec<UnifiedRow> {
    let changed: Vec<bool> = lines.iter().map(|l| !l.line.is_unchanged()).collect();
    let visible = visible_rows(&changed, context_lines);

    let rows = fold_rows(lines, &visible, UnifiedRow::Line, |hidden| {
        let first = &hidden[0].line;
        UnifiedRow::Collapsed(UnifiedCollapsedBlock {
            count: hidden.len(),
            start_line_number: first.line_number,
            start_original_line: first.original_line_number,
            start_new_line: first.new_line_number,
            lines: hidden,
        })
    });

    debug!(
        "unified context filter: {} lines into {} rows ({} context lines)",
        lines.len(),
        rows.len(),
        context_lines
    );
    rows
}

/// Replace the collapsed block at `index` with the rows it hides.
///
/// Any other index leaves the rows as they are.
pub fn expand_collapsed(mut rows: Vec<SideBySideRow>, index: usize) -> Vec<SideBySideRow> {
    if !matches!(rows.get(index), Some(SideBySideRow::Collapsed(_))) {
        return rows;
    }

    if let SideBySideRow::Collapsed(block) = rows.remove(index) {
        rows.splice(index..index, block.lines.into_iter().map(SideBySideRow::Pair));
    }
    rows
}

/// Replace the collapsed block at `index` with the lines it hides.
///
/// Any other index leaves the rows as they are.
pub fn expand_collapsed_unified(mut rows: Vec<UnifiedRow>, index: usize) -> Vec<UnifiedRow> {
    if !matches!(rows.get(index), Some(UnifiedRow::Collapsed(_))) {
        return rows;
    }

    if let UnifiedRow::Collapsed(block) = rows.remove(index) {
        rows.splice(index..index, block.lines.into_iter().map(UnifiedRow::Line));
    }
    rows
}
