//! Commit history traversal
//!
//! History is linear: every commit has at most one parent, so `rev_list`
//! simply follows parent pointers from the tip of the current branch.

pub mod rev_list;
