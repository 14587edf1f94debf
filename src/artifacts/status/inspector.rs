//! Three-way file classification
//!
//! The inspector compares three `path -> hash` maps (index, last commit and
//! working tree) and sorts every path into the status categories. It never
//! touches the disk.

use crate::artifacts::index::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{IndexChangeType, WorkspaceChangeType};
use crate::artifacts::status::status_info::WorkingDirectoryStatus;
use derive_new::new;

#[derive(Debug, new)]
pub struct Inspector<'a> {
    index: &'a Manifest,
    head: &'a Manifest,
}

impl<'a> Inspector<'a> {
    /// Compare a staged entry with the last commit
    pub fn check_index_against_head(
        &self,
        path: &str,
        oid: &ObjectId,
    ) -> Option<IndexChangeType> {
        match self.head.get(path) {
            None => Some(IndexChangeType::Added),
            Some(head_oid) if head_oid != oid => Some(IndexChangeType::Modified),
            Some(_) => None,
        }
    }

    /// Compare a working file with the index, or with the last commit when
    /// the path is not staged
    pub fn check_workspace_file(
        &self,
        path: &str,
        oid: &ObjectId,
    ) -> Option<WorkspaceChangeType> {
        match self.index.get(path).or_else(|| self.head.get(path)) {
            None => Some(WorkspaceChangeType::Untracked),
            Some(tracked_oid) if tracked_oid != oid => Some(WorkspaceChangeType::Modified),
            Some(_) => None,
        }
    }

    /// Classify a tracked path that no longer exists on disk
    pub fn check_missing_file(&self, path: &str) -> FileDeletion {
        if self.index.contains_key(path) {
            FileDeletion::Unstaged
        } else {
            FileDeletion::Staged
        }
    }

    pub fn classify(&self, working_files: Manifest) -> WorkingDirectoryStatus {
        let mut status = WorkingDirectoryStatus::default();

        for (path, oid) in self.index {
            match self.check_index_against_head(path, oid) {
                Some(IndexChangeType::Added) => {
                    status.staged_new.insert(path.clone());
                }
                Some(IndexChangeType::Modified) => {
                    status.staged_modified.insert(path.clone());
                }
                Some(IndexChangeType::Deleted) | None => {}
            }
        }

        for (path, oid) in &working_files {
            match self.check_workspace_file(path, oid) {
                Some(WorkspaceChangeType::Untracked) => {
                    status.untracked.insert(path.clone());
                }
                Some(WorkspaceChangeType::Modified) => {
                    status.unstaged_modified.insert(path.clone());
                }
                Some(WorkspaceChangeType::Deleted) | None => {}
            }
        }

        let tracked = self.index.keys().chain(self.head.keys());
        for path in tracked.filter(|path| !working_files.contains_key(*path)) {
            match self.check_missing_file(path) {
                FileDeletion::Staged => status.staged_deleted.insert(path.clone()),
                FileDeletion::Unstaged => status.unstaged_deleted.insert(path.clone()),
            };
        }

        status.working_files = working_files;
        status
    }
}

/// Where the deletion of a tracked file is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDeletion {
    /// Removed from the index but still in the last commit
    Staged,
    /// Still in the index
    Unstaged,
}
