//! Checkout operations
//!
//! Switching branches rewrites the working tree from the source commit's
//! manifest to the target commit's manifest. Checkout refuses to run on a
//! dirty working tree, so no conflict detection is needed.

pub mod migration;
