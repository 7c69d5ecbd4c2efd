use crate::myers::{self, Edit};
use crate::{CharSegment, SegmentType};
use log::trace;
use serde::{Deserialize, Serialize};

/// Minimum LCS ratio for two lines to be highlighted character by character.
pub const DEFAULT_CHAR_DIFF_THRESHOLD: f64 = 0.6;

/// Below this length ratio two lines are too different in size to be worth comparing.
const MIN_LENGTH_RATIO: f64 = 0.3;

/// Character-level segments for a removed/added line pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharDiff {
    pub original_segments: Vec<CharSegment>,
    pub modified_segments: Vec<CharSegment>,
}

/// Accumulates characters into run-length merged segments.
#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<CharSegment>,
}

impl SegmentBuilder {
    fn push(&mut self, ch: char, segment_type: SegmentType) {
        match self.segments.last_mut() {
            Some(last) if last.segment_type == segment_type => last.text.push(ch),
            _ => self
                .segments
                .push(CharSegment::new(ch.to_string(), segment_type)),
        }
    }

    fn finish(self) -> Vec<CharSegment> {
        self.segments
    }
}

/// Compute character-level differences between two strings.
///
/// Works on Unicode scalar values. Concatenating the original segments gives back
/// `original`, concatenating the modified segments gives back `modified`.
pub fn calculate_char_diff(original: &str, modified: &str) -> CharDiff {
    if original == modified {
        let segments = vec![CharSegment::new(original, SegmentType::Unchanged)];
        return CharDiff {
            original_segments: segments.clone(),
            modified_segments: segments,
        };
    }

    let old_chars: Vec<char> = original.chars().collect();
    let new_chars: Vec<char> = modified.chars().collect();
    let edits = myers::diff(&old_chars, &new_chars);

    let mut old_side = SegmentBuilder::default();
    let mut new_side = SegmentBuilder::default();

    for edit in edits {
        match edit {
            Edit::Equal { old, new } => {
                old_side.push(old_chars[old], SegmentType::Unchanged);
                new_side.push(new_chars[new], SegmentType::Unchanged);
            }
            Edit::Delete { old } => old_side.push(old_chars[old], SegmentType::Removed),
            Edit::Insert { new } => new_side.push(new_chars[new], SegmentType::Added),
        }
    }

    CharDiff {
        original_segments: old_side.finish(),
        modified_segments: new_side.finish(),
    }
}

/// Decide whether two lines are similar enough for character highlighting.
///
/// Empty or identical strings and strings whose lengths differ by more than a factor of
/// roughly three are rejected outright. Otherwise the longest common subsequence must
/// cover at least `threshold` of the longer string.
pub fn should_show_char_diff(a: &str, b: &str, threshold: f64) -> bool {
    if a.is_empty() || b.is_empty() || a == b {
        return false;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let shorter = a_chars.len().min(b_chars.len());
    let longer = a_chars.len().max(b_chars.len());

    if (shorter as f64) / (longer as f64) < MIN_LENGTH_RATIO {
        return false;
    }

    let lcs = lcs_length(&a_chars, &b_chars);
    let ratio = lcs as f64 / longer as f64;
    trace!("char diff similarity {ratio:.3} (lcs {lcs}, longest {longer})");
    ratio >= threshold
}

/// Length of the longest common subsequence, using two rows sized to the shorter input.
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev = vec![0usize; inner.len() + 1];
    let mut curr = vec![0usize; inner.len() + 1];

    for x in outer {
        for (j, y) in inner.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[inner.len()]
}
