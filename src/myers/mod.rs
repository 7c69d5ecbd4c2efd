//! Myers O(ND) shortest edit script.
//!
//! The greedy forward pass records, for every edit depth `d`, the furthest-reaching
//! x on each diagonal `k` in `-d..=d`. Those snapshots live in one flat buffer: the
//! snapshot for depth `d` starts at offset `d * d` and holds `2d + 1` entries, so
//! backtracking needs no per-depth allocation.

/// One step of an edit script. Indices are 0-based positions in the input slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Equal { old: usize, new: usize },
    Delete { old: usize },
    Insert { new: usize },
}

/// Snapshots of the V array, one per completed depth.
struct Trace {
    buf: Vec<isize>,
}

impl Trace {
    fn with_capacity(depths: usize) -> Self {
        Self {
            buf: Vec::with_capacity(depths * depths),
        }
    }

    fn push(&mut self, v: &[isize], offset: isize, d: isize) {
        let lo = (offset - d) as usize;
        let hi = (offset + d) as usize;
        self.buf.extend_from_slice(&v[lo..=hi]);
    }

    fn get(&self, d: isize, k: isize) -> isize {
        self.buf[(d * d + k + d) as usize]
    }
}

/// Compute a minimal edit script turning `a` into `b`.
///
/// Time is O((N+M)·D); trace memory is O(D²) which is O((N+M)²) in the worst case.
pub fn diff<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Edit> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max = n + m;

    if max == 0 {
        return Vec::new();
    }

    let offset = max;
    let mut v = vec![0isize; (2 * max + 1) as usize];
    // Small initial reservation; most diffs terminate at a shallow depth.
    let mut trace = Trace::with_capacity(16.min(max as usize + 1));

    for d in 0..=max {
        let mut k = -d;
        while k <= d {
            let mut x = if k == -d
                || (k != d && v[(offset + k - 1) as usize] < v[(offset + k + 1) as usize])
            {
                v[(offset + k + 1) as usize]
            } else {
                v[(offset + k - 1) as usize] + 1
            };
            let mut y = x - k;

            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }

            v[(offset + k) as usize] = x;

            if x >= n && y >= m {
                return backtrack(&trace, d, n, m);
            }

            k += 2;
        }

        trace.push(&v, offset, d);
    }

    // The loop always reaches (n, m) by depth n + m.
    unreachable!("myers search exhausted without reaching the end point")
}

/// Walk the recorded snapshots from `(n, m)` back to the origin.
fn backtrack(trace: &Trace, depth: isize, n: isize, m: isize) -> Vec<Edit> {
    let mut edits = Vec::with_capacity((n + m) as usize);
    let mut x = n;
    let mut y = m;

    for d in (1..=depth).rev() {
        let k = x - y;
        let prev = d - 1;

        let prev_k = if k == -d || (k != d && trace.get(prev, k - 1) < trace.get(prev, k + 1)) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = trace.get(prev, prev_k);
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            x -= 1;
            y -= 1;
            edits.push(Edit::Equal {
                old: x as usize,
                new: y as usize,
            });
        }

        if x == prev_x {
            y -= 1;
            edits.push(Edit::Insert { new: y as usize });
        } else {
            x -= 1;
            edits.push(Edit::Delete { old: x as usize });
        }
    }

    while x > 0 && y > 0 {
        x -= 1;
        y -= 1;
        edits.push(Edit::Equal {
            old: x as usize,
            new: y as usize,
        });
    }

    edits.reverse();
    edits
}

/// Number of non-equal steps in an edit script.
pub fn edit_distance(edits: &[Edit]) -> usize {
    edits
        .iter()
        .filter(|e| !matches!(e, Edit::Equal { .. }))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(a: &[char], b: &[char], edits: &[Edit]) -> (String, String) {
        let mut old = String::new();
        let mut new = String::new();
        for edit in edits {
            match *edit {
                Edit::Equal { old: i, new: j } => {
                    assert_eq!(a[i], b[j]);
                    old.push(a[i]);
                    new.push(b[j]);
                }
                Edit::Delete { old: i } => old.push(a[i]),
                Edit::Insert { new: j } => new.push(b[j]),
            }
        }
        (old, new)
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn empty_inputs_produce_empty_script() {
        let empty: [u8; 0] = [];
        assert!(diff(&empty, &empty).is_empty());
    }

    #[test]
    fn identical_inputs_are_all_equal() {
        let a = chars("abcdef");
        let edits = diff(&a, &a);
        assert_eq!(edits.len(), 6);
        assert_eq!(edit_distance(&edits), 0);
    }

    #[test]
    fn one_side_empty() {
        let a = chars("abc");
        let b: Vec<char> = Vec::new();
        assert_eq!(
            diff(&a, &b),
            vec![
                Edit::Delete { old: 0 },
                Edit::Delete { old: 1 },
                Edit::Delete { old: 2 }
            ]
        );
        assert_eq!(
            diff(&b, &a),
            vec![
                Edit::Insert { new: 0 },
                Edit::Insert { new: 1 },
                Edit::Insert { new: 2 }
            ]
        );
    }

    #[test]
    fn classic_example_has_distance_five() {
        // Myers' paper example: ABCABBA -> CBABAC, D = 5.
        let a = chars("ABCABBA");
        let b = chars("CBABAC");
        let edits = diff(&a, &b);
        assert_eq!(edit_distance(&edits), 5);
        let (old, new) = apply(&a, &b, &edits);
        assert_eq!(old, "ABCABBA");
        assert_eq!(new, "CBABAC");
    }

    #[test]
    fn deletions_precede_insertions_at_same_position() {
        let a = chars("abc");
        let b = chars("axc");
        assert_eq!(
            diff(&a, &b),
            vec![
                Edit::Equal { old: 0, new: 0 },
                Edit::Delete { old: 1 },
                Edit::Insert { new: 1 },
                Edit::Equal { old: 2, new: 2 },
            ]
        );
    }

    #[test]
    fn script_replays_both_inputs() {
        let cases = [
            ("", "xyz"),
            ("kitten", "sitting"),
            ("the quick brown fox", "the quack brown box jumps"),
            ("aaaa", "aa"),
            ("abcabc", "cbacba"),
        ];
        for (a, b) in cases {
            let (ca, cb) = (chars(a), chars(b));
            let (old, new) = apply(&ca, &cb, &diff(&ca, &cb));
            assert_eq!(old, a);
            assert_eq!(new, b);
        }
    }
}
