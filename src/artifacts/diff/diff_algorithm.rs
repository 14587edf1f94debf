use crate::artifacts::diff::MAX_CHAIN_LENGTH;
use derive_new::new;
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

/// Replacement of the old lines `[begin_old, end_old)` by the new lines
/// `[begin_new, end_new)`; either range may be empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Edit {
    pub begin_old: usize,
    pub end_old: usize,
    pub begin_new: usize,
    pub end_new: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Delete,
    Replace,
}

impl Edit {
    pub fn kind(&self) -> EditKind {
        match (self.old_range().is_empty(), self.new_range().is_empty()) {
            (true, _) => EditKind::Insert,
            (_, true) => EditKind::Delete,
            _ => EditKind::Replace,
        }
    }

    pub fn old_range(&self) -> Range<usize> {
        self.begin_old..self.end_old
    }

    pub fn new_range(&self) -> Range<usize> {
        self.begin_new..self.end_new
    }

    fn shifted(self, old_offset: usize, new_offset: usize) -> Self {
        Edit::new(
            self.begin_old + old_offset,
            self.end_old + old_offset,
            self.begin_new + new_offset,
            self.end_new + new_offset,
        )
    }
}

pub trait DiffAlgorithm {
    /// Ordered, non-overlapping edits turning the old sequence into the new one
    fn diff(&self) -> Vec<Edit>;
}

/// Apply an edit script to `old`, yielding the new sequence
pub fn apply_edits<T: Clone>(old: &[T], new: &[T], edits: &[Edit]) -> Vec<T> {
    let mut result = Vec::with_capacity(new.len());
    let mut cursor = 0;

    for edit in edits {
        result.extend_from_slice(&old[cursor..edit.begin_old]);
        result.extend_from_slice(&new[edit.new_range()]);
        cursor = edit.end_old;
    }
    result.extend_from_slice(&old[cursor..]);

    result
}

/// Myers' O(ND) shortest edit script
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<'d, T: Eq> MyersDiff<'d, T> {
    fn compute_shortest_edit(&self) -> Vec<Vec<isize>> {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (n + m) as usize;

        let mut v = vec![0; 2 * offset + 2];
        let mut trace = Vec::new();

        for d in 0..=(n + m) {
            trace.push(v.clone());

            for k in (-d..=d).step_by(2) {
                let idx = (offset as isize + k) as usize;

                let mut x = if k == -d {
                    // we could have only come from k+1, thus an insertion
                    v[idx + 1]
                } else if k == d {
                    // we could have only come from k-1, thus a deletion
                    v[idx - 1] + 1
                } else {
                    let x_del = v[idx - 1] + 1;
                    let x_ins = v[idx + 1];
                    if x_del > x_ins { x_del } else { x_ins }
                };

                let mut y = x - k;
                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    // snake
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return trace;
                }
            }
        }

        trace
    }

    /// Moves `(prev_x, prev_y, x, y)` from the end of both sequences back
    /// to their start
    fn backtrack(&self) -> Vec<(isize, isize, isize, isize)> {
        let (mut x, mut y) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (x + y) as usize;
        let mut edit_path = Vec::new();

        let trace = self.compute_shortest_edit();

        for (d, v) in trace.iter().enumerate().rev() {
            let k = x - y;

            let prev_k = if k == -(d as isize) {
                k + 1
            } else if k == (d as isize) {
                k - 1
            } else {
                let k_del = k - 1;
                let k_ins = k + 1;
                if v[(offset as isize + k_del) as usize] + 1 > v[(offset as isize + k_ins) as usize]
                {
                    k_del
                } else {
                    k_ins
                }
            };

            let prev_x = v[(offset as isize + prev_k) as usize];
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                edit_path.push((x - 1, y - 1, x, y));
                x -= 1;
                y -= 1;
            }

            if d > 0 {
                edit_path.push((prev_x, prev_y, x, y));
            }

            (x, y) = (prev_x, prev_y);
        }

        edit_path
    }
}

impl<'d, T: Eq> DiffAlgorithm for MyersDiff<'d, T> {
    fn diff(&self) -> Vec<Edit> {
        if self.a.is_empty() && self.b.is_empty() {
            return Vec::new();
        }

        let mut edits = Vec::new();
        let mut pending: Option<Edit> = None;

        for (prev_x, prev_y, x, y) in self.backtrack().into_iter().rev() {
            let (prev_x, prev_y) = (prev_x as usize, prev_y as usize);

            if x as usize == prev_x {
                // insertion of b[prev_y]
                let edit = pending.get_or_insert(Edit::new(prev_x, prev_x, prev_y, prev_y));
                edit.end_new = prev_y + 1;
            } else if y as usize == prev_y {
                // deletion of a[prev_x]
                let edit = pending.get_or_insert(Edit::new(prev_x, prev_x, prev_y, prev_y));
                edit.end_old = prev_x + 1;
            } else if let Some(edit) = pending.take() {
                edits.push(edit);
            }
        }
        edits.extend(pending);

        edits
    }
}

/// Histogram diff
///
/// Picks the line with the fewest occurrences in the old region that also
/// appears in the new region, grows the match around it and recurses on both
/// sides. Regions where every shared line is too frequent fall back to Myers;
/// regions sharing no line at all become a single replacement.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct HistogramDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

#[derive(Debug, Clone, Copy)]
struct Anchor {
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
    occurrences: usize,
}

impl Anchor {
    fn len(&self) -> usize {
        self.a_end - self.a_start
    }
}

impl<'d, T: Eq + Hash> HistogramDiff<'d, T> {
    fn diff_region(&self, a: Range<usize>, b: Range<usize>, edits: &mut Vec<Edit>) {
        let (a, b) = self.trim_common(a, b);

        if a.is_empty() && b.is_empty() {
            return;
        }
        if a.is_empty() || b.is_empty() {
            edits.push(Edit::new(a.start, a.end, b.start, b.end));
            return;
        }

        match self.find_anchor(a.clone(), b.clone()) {
            Some(anchor) => {
                self.diff_region(a.start..anchor.a_start, b.start..anchor.b_start, edits);
                self.diff_region(anchor.a_end..a.end, anchor.b_end..b.end, edits);
            }
            None if self.shares_any_line(a.clone(), b.clone()) => {
                let fallback = MyersDiff::new(&self.a[a.clone()], &self.b[b.clone()]).diff();
                edits.extend(
                    fallback
                        .into_iter()
                        .map(|edit| edit.shifted(a.start, b.start)),
                );
            }
            None => edits.push(Edit::new(a.start, a.end, b.start, b.end)),
        }
    }

    fn trim_common(&self, mut a: Range<usize>, mut b: Range<usize>) -> (Range<usize>, Range<usize>) {
        while !a.is_empty() && !b.is_empty() && self.a[a.start] == self.b[b.start] {
            a.start += 1;
            b.start += 1;
        }
        while !a.is_empty() && !b.is_empty() && self.a[a.end - 1] == self.b[b.end - 1] {
            a.end -= 1;
            b.end -= 1;
        }

        (a, b)
    }

    fn find_anchor(&self, a: Range<usize>, b: Range<usize>) -> Option<Anchor> {
        let mut histogram: HashMap<&T, Vec<usize>> = HashMap::new();
        for i in a.clone() {
            histogram.entry(&self.a[i]).or_default().push(i);
        }

        let mut best: Option<Anchor> = None;

        for j in b.clone() {
            let Some(positions) = histogram.get(&self.b[j]) else {
                continue;
            };
            if positions.len() > MAX_CHAIN_LENGTH {
                continue;
            }
            if best.is_some_and(|best| positions.len() > best.occurrences) {
                continue;
            }

            for &i in positions {
                let candidate = self.extend_match(i, j, a.clone(), b.clone(), positions.len());
                let better = match best {
                    None => true,
                    Some(best) => {
                        candidate.occurrences < best.occurrences
                            || (candidate.occurrences == best.occurrences
                                && candidate.len() > best.len())
                    }
                };
                if better {
                    best = Some(candidate);
                }
            }
        }

        best
    }

    fn extend_match(
        &self,
        i: usize,
        j: usize,
        a: Range<usize>,
        b: Range<usize>,
        occurrences: usize,
    ) -> Anchor {
        let (mut a_start, mut b_start) = (i, j);
        while a_start > a.start && b_start > b.start && self.a[a_start - 1] == self.b[b_start - 1] {
            a_start -= 1;
            b_start -= 1;
        }

        let (mut a_end, mut b_end) = (i + 1, j + 1);
        while a_end < a.end && b_end < b.end && self.a[a_end] == self.b[b_end] {
            a_end += 1;
            b_end += 1;
        }

        Anchor {
            a_start,
            a_end,
            b_start,
            b_end,
            occurrences,
        }
    }

    fn shares_any_line(&self, a: Range<usize>, b: Range<usize>) -> bool {
        let old_lines = self.a[a].iter().collect::<std::collections::HashSet<_>>();
        self.b[b].iter().any(|line| old_lines.contains(line))
    }
}

impl<'d, T: Eq + Hash> DiffAlgorithm for HistogramDiff<'d, T> {
    fn diff(&self) -> Vec<Edit> {
        let mut edits = Vec::new();
        self.diff_region(0..self.a.len(), 0..self.b.len(), &mut edits);
        edits
    }
}

/// Line diff used by the `diff` command
pub fn diff_lines(old: &[&str], new: &[&str]) -> Vec<Edit> {
    HistogramDiff::new(old, new).diff()
}
