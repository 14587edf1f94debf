//! Data structures and algorithms that sit on top of the on-disk areas
//!
//! Nothing here writes to `.gitter` by itself except the staging session,
//! which goes through the index it owns.

pub mod branch;
pub mod checkout;
pub mod core;
pub mod diff;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
