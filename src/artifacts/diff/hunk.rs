//! Unified hunks
//!
//! Every edit becomes its own hunk: adjacent edits are not merged. Context
//! stops at the changed lines of the neighbouring edits, but an unchanged
//! line between two close edits is shown as context in both hunks.

use crate::artifacts::diff::diff_algorithm::Edit;
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkLine<'t> {
    Context(&'t str),
    Deletion(&'t str),
    Insertion(&'t str),
}

impl HunkLine<'_> {
    pub fn colored(&self) -> String {
        match self {
            HunkLine::Context(_) => self.to_string(),
            HunkLine::Deletion(_) => self.to_string().red().to_string(),
            HunkLine::Insertion(_) => self.to_string().green().to_string(),
        }
    }
}

impl std::fmt::Display for HunkLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HunkLine::Context(line) => write!(f, " {line}"),
            HunkLine::Deletion(line) => write!(f, "-{line}"),
            HunkLine::Insertion(line) => write!(f, "+{line}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<'t> {
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
    pub lines: Vec<HunkLine<'t>>,
}

impl<'t> Hunk<'t> {
    /// Build one hunk per edit with up to `context` unchanged lines on each side
    pub fn build(edits: &[Edit], old: &[&'t str], new: &[&'t str], context: usize) -> Vec<Self> {
        edits
            .iter()
            .enumerate()
            .map(|(position, edit)| {
                let previous_end = position
                    .checked_sub(1)
                    .map(|previous| edits[previous].end_old)
                    .unwrap_or(0);
                let next_begin = edits
                    .get(position + 1)
                    .map(|next| next.begin_old)
                    .unwrap_or(old.len());

                Self::from_edit(edit, old, new, context, previous_end, next_begin)
            })
            .collect()
    }

    fn from_edit(
        edit: &Edit,
        old: &[&'t str],
        new: &[&'t str],
        context: usize,
        previous_end: usize,
        next_begin: usize,
    ) -> Self {
        let before = edit.begin_old - edit.begin_old.saturating_sub(context).max(previous_end);
        let after = (edit.end_old + context).min(next_begin) - edit.end_old;

        let old_first = edit.begin_old - before;
        let new_first = edit.begin_new - before;

        let mut lines = Vec::new();
        lines.extend(old[old_first..edit.begin_old].iter().copied().map(HunkLine::Context));
        lines.extend(old[edit.old_range()].iter().copied().map(HunkLine::Deletion));
        lines.extend(new[edit.new_range()].iter().copied().map(HunkLine::Insertion));
        lines.extend(
            old[edit.end_old..edit.end_old + after]
                .iter()
                .copied()
                .map(HunkLine::Context),
        );

        let old_len = before + edit.old_range().len() + after;
        let new_len = before + edit.new_range().len() + after;

        Hunk {
            old_start: Self::header_start(old_first, old_len),
            old_len,
            new_start: Self::header_start(new_first, new_len),
            new_len,
            lines,
        }
    }

    /// 1-based start line; an empty side names the line it follows
    fn header_start(first: usize, len: usize) -> usize {
        if len == 0 { first } else { first + 1 }
    }

    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_len, self.new_start, self.new_len
        )
    }
}

impl std::fmt::Display for Hunk<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.header())?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
