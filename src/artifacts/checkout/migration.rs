//! Working tree migration between two commits
//!
//! A migration is planned from the manifests of the source and the target
//! commit:
//!
//! 1. every path tracked by the source but not by the target is deleted
//! 2. every path of the target is written from its blob, whether or not the
//!    content on disk already matches
//!
//! Deletions always run before writes so a file replaced by a directory of
//! the same name (or the reverse) can be materialized.

use crate::artifacts::index::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Rewrite a file tracked on both sides
    Modify,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    deletions: Vec<String>,
    writes: BTreeMap<String, (ActionType, ObjectId)>,
}

impl Migration {
    pub fn plan(source: &Manifest, target: &Manifest) -> Self {
        let deletions = source
            .keys()
            .filter(|path| !target.contains_key(*path))
            .cloned()
            .collect();

        let writes = target
            .iter()
            .map(|(path, oid)| {
                let action = if source.contains_key(path) {
                    ActionType::Modify
                } else {
                    ActionType::Add
                };
                (path.clone(), (action, oid.clone()))
            })
            .collect();

        Migration { deletions, writes }
    }

    pub fn deletions(&self) -> &[String] {
        &self.deletions
    }

    pub fn writes(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.writes.iter().map(|(path, (_, oid))| (path, oid))
    }

    pub fn paths_with_action(&self, action: ActionType) -> Vec<&str> {
        match action {
            ActionType::Delete => self.deletions.iter().map(String::as_str).collect(),
            _ => self
                .writes
                .iter()
                .filter(|(_, (kind, _))| *kind == action)
                .map(|(path, _)| path.as_str())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.writes.is_empty()
    }
}
