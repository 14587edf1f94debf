//! Everyday workflow commands
//!
//! Each file adds one method to `Repository`. They load what they need from
//! the areas, do their work in memory and persist at the end.
//!
//! - `init` lays out `.gitter`
//! - `add` and `reset` move files in and out of the index
//! - `commit` snapshots the index onto the current branch
//! - `status`, `diff` and `log` only read
//! - `checkout` switches or creates branches

pub mod add;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod reset;
pub mod status;
