//! Index file format and staging
//!
//! The index (staging area) records which content will be in the next commit.
//! It is a plain text file with one entry per line:
//!
//! ```text
//! <path>\t<hash>
//! ```
//!
//! Paths are slash-separated and relative to the repository root. The same
//! line format is used for the file manifest embedded in commit objects.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

pub mod index_entry;
pub mod staging_session;

/// Complete `path -> hash` listing, as stored in the index or in a commit
pub type Manifest = BTreeMap<String, ObjectId>;

/// Separator between the path and the hash of an entry
pub const ENTRY_SEPARATOR: char = '\t';
