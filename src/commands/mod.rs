//! Subcommands, written as `impl Repository` blocks
//!
//! `plumbing` exposes the object store directly. `porcelain` holds the
//! staging, committing and branching workflow.

pub mod plumbing;
pub mod porcelain;
