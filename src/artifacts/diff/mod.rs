//! Line diffing
//!
//! - `diff_algorithm`: edit scripts between two line sequences (histogram
//!   diff with a Myers fallback)
//! - `hunk`: unified hunks with surrounding context built from an edit script

pub mod diff_algorithm;
pub mod hunk;

/// Unchanged lines shown around each change
pub const CONTEXT_LINES: usize = 3;

/// Lines occurring more often than this are never used as histogram anchors
pub const MAX_CHAIN_LENGTH: usize = 64;

/// Split text into lines without their terminators
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}
