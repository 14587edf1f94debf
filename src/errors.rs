//! Error taxonomy for the storage and versioning core
//!
//! Every area (database, index, refs, workspace) reports failures through
//! [`GitterError`]. Command implementations wrap these in `anyhow` with
//! additional context before they reach the user.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::PathBuf;

/// Errors raised by the repository core
#[derive(Debug, thiserror::Error)]
pub enum GitterError {
    /// The referenced object is absent from the object store
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// The on-disk object record could not be parsed
    #[error("malformed object {oid}: {reason}")]
    MalformedObject { oid: ObjectId, reason: String },

    /// The object was read with a different type than the one stored
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: ObjectType,
        /// Type token found in the stored header, possibly one gitter does not know
        actual: String,
    },

    /// The declared payload length disagrees with the stored payload
    #[error("object corruption: expected size {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// An index or manifest line is not a `path<TAB>hash` pair
    #[error("repository data is corrupted: {reason} in {line:?}")]
    IndexCorruption { line: String, reason: String },

    /// A revision or branch reference could not be resolved
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A pathspec matched no file
    #[error("pathspec '{0}' did not match any files")]
    NoMatch(String),

    #[error("'{0}' is not a valid branch name")]
    InvalidBranchName(String),

    #[error("a branch named '{0}' already exists")]
    BranchExists(String),

    #[error("pathspec '{0}' did not match any branch known to gitter")]
    BranchNotFound(String),

    #[error("nothing to commit, use 'gitter add' to stage files")]
    NothingToCommit,

    #[error("you have uncommitted changes, commit or reset them before you switch branches")]
    UncommittedChanges,

    #[error("not a gitter repository (or any of the parent directories): {}", .0.display())]
    NotARepository(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// Result alias for core operations
pub type GitterResult<T> = Result<T, GitterError>;
