use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::index::Manifest;
use crate::artifacts::status::file_change::{
    FileChangeType, IndexChangeType, WorkspaceChangeType,
};
use crate::artifacts::status::inspector::Inspector;
use crate::errors::GitterResult;
use derive_new::new;
use std::collections::BTreeSet;

pub type FileSet = BTreeSet<String>;

/// Snapshot of how the working tree, the index and the last commit differ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingDirectoryStatus {
    pub staged_new: FileSet,
    pub staged_modified: FileSet,
    pub staged_deleted: FileSet,
    pub unstaged_modified: FileSet,
    pub unstaged_deleted: FileSet,
    pub untracked: FileSet,
    /// Hashes of the working files the status was computed from
    pub working_files: Manifest,
}

impl WorkingDirectoryStatus {
    pub fn has_staged_changes(&self) -> bool {
        !(self.staged_new.is_empty()
            && self.staged_modified.is_empty()
            && self.staged_deleted.is_empty())
    }

    pub fn has_unstaged_changes(&self) -> bool {
        !(self.unstaged_modified.is_empty() && self.unstaged_deleted.is_empty())
    }

    pub fn is_clean(&self) -> bool {
        !self.has_staged_changes() && !self.has_unstaged_changes() && self.untracked.is_empty()
    }

    pub fn changed_count(&self) -> usize {
        self.staged_new.len()
            + self.staged_modified.len()
            + self.staged_deleted.len()
            + self.unstaged_modified.len()
            + self.unstaged_deleted.len()
            + self.untracked.len()
    }

    /// Staged changes in path order
    pub fn index_changeset(&self) -> Vec<(&str, FileChangeType)> {
        Self::merge_changes([
            (&self.staged_new, FileChangeType::Index(IndexChangeType::Added)),
            (&self.staged_modified, FileChangeType::Index(IndexChangeType::Modified)),
            (&self.staged_deleted, FileChangeType::Index(IndexChangeType::Deleted)),
        ])
    }

    /// Unstaged changes of tracked files in path order
    pub fn workspace_changeset(&self) -> Vec<(&str, FileChangeType)> {
        Self::merge_changes([
            (
                &self.unstaged_modified,
                FileChangeType::Workspace(WorkspaceChangeType::Modified),
            ),
            (
                &self.unstaged_deleted,
                FileChangeType::Workspace(WorkspaceChangeType::Deleted),
            ),
        ])
    }

    fn merge_changes<'s, const N: usize>(
        sets: [(&'s FileSet, FileChangeType); N],
    ) -> Vec<(&'s str, FileChangeType)> {
        let mut changes = sets
            .into_iter()
            .flat_map(|(paths, change)| paths.iter().map(move |path| (path.as_str(), change)))
            .collect::<Vec<_>>();
        changes.sort();
        changes
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    /// Hash the working tree and classify it against `index` and HEAD
    pub fn initialize(&self, index: &Index) -> GitterResult<WorkingDirectoryStatus> {
        let head_oid = self.repository.refs().read_head()?;
        let head = self.repository.database().load_manifest(head_oid.as_ref())?;
        let staged = index.manifest();
        let working_files = self.repository.workspace().hash_files()?;

        let status = Inspector::new(&staged, &head).classify(working_files);
        tracing::debug!(changes = status.changed_count(), "computed status");

        Ok(status)
    }
}
