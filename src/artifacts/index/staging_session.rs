use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::core::pathspec::Pathspec;
use crate::artifacts::index::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::status::status_info::WorkingDirectoryStatus;
use crate::errors::{GitterError, GitterResult};

/// Working copy of the index for the duration of one command
///
/// Every mutation happens in memory. The index file is only touched by
/// [`StagingSession::write`], so a session dropped after an error leaves the
/// file exactly as it was loaded.
pub struct StagingSession<'r> {
    repository: &'r Repository,
    index: Index,
}

impl<'r> StagingSession<'r> {
    pub fn open(repository: &'r Repository) -> GitterResult<Self> {
        let index = repository.load_index()?;
        Ok(StagingSession { repository, index })
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Store the current content of each working file and point its entry at it
    pub fn stage<'p>(&mut self, paths: impl IntoIterator<Item = &'p String>) -> GitterResult<()> {
        for path in paths {
            let content = self.repository.workspace().read_file(path)?;
            let oid = self.repository.database().write(ObjectType::Blob, &content)?;
            self.index.add(path.clone(), oid);
        }

        Ok(())
    }

    /// Drop the given paths, returning how many were tracked
    pub fn unstage<'p>(&mut self, paths: impl IntoIterator<Item = &'p String>) -> usize {
        paths
            .into_iter()
            .filter(|path| self.index.remove(path))
            .count()
    }

    /// Make the index mirror a commit, or empty it when there is none
    pub fn sync_to_commit(&mut self, oid: Option<&ObjectId>) -> GitterResult<()> {
        match oid {
            None => self.index.clear(),
            Some(oid) => {
                let commit = self.repository.database().parse_object_as_commit(oid)?;
                self.index.replace(commit.manifest());
            }
        }

        Ok(())
    }

    /// Stage every modification and deletion of a tracked file
    ///
    /// Untracked files are left alone. Returns whether the index changed.
    pub fn stage_modified(&mut self, status: &WorkingDirectoryStatus) -> GitterResult<bool> {
        let mut changed = false;

        for path in &status.unstaged_modified {
            let oid = match status.working_files.get(path) {
                Some(oid) if self.repository.database().exists(Some(oid)) => oid.clone(),
                _ => {
                    let content = self.repository.workspace().read_file(path)?;
                    self.repository.database().write(ObjectType::Blob, &content)?
                }
            };
            self.index.add(path.clone(), oid);
            changed = true;
        }

        for path in &status.unstaged_deleted {
            changed |= self.index.remove(path);
        }

        Ok(changed)
    }

    /// Stage whatever a pattern selects among changed and untracked files
    ///
    /// A pattern that selects nothing is still accepted when it names a file
    /// that is already up to date; otherwise it fails with `NoMatch`.
    pub fn add_pattern(
        &mut self,
        pathspec: &Pathspec,
        status: &WorkingDirectoryStatus,
    ) -> GitterResult<()> {
        let to_stage =
            pathspec.filter(status.unstaged_modified.iter().chain(status.untracked.iter()));
        let to_remove = pathspec.filter(&status.unstaged_deleted);

        if to_stage.is_empty()
            && to_remove.is_empty()
            && !Self::matches_any(pathspec, &status.working_files)
        {
            return Err(GitterError::NoMatch(pathspec.raw().to_string()));
        }

        tracing::debug!(
            pattern = pathspec.raw(),
            staged = to_stage.len(),
            removed = to_remove.len(),
            "matched pathspec"
        );
        self.stage(&to_stage)?;
        self.unstage(&to_remove);

        Ok(())
    }

    /// Unstage the index entries a pattern selects
    pub fn unstage_pattern(
        &mut self,
        pathspec: &Pathspec,
        working_files: &Manifest,
    ) -> GitterResult<usize> {
        let tracked = self
            .index
            .entries()
            .map(|entry| entry.path.clone())
            .collect::<Vec<_>>();
        let matched = pathspec.filter(&tracked);

        if matched.is_empty() && !Self::matches_any(pathspec, working_files) {
            return Err(GitterError::NoMatch(pathspec.raw().to_string()));
        }

        Ok(self.unstage(&matched))
    }

    /// Persist the index if anything changed, consuming the session
    pub fn write(mut self) -> GitterResult<bool> {
        if !self.index.has_changed() {
            return Ok(false);
        }

        self.index.write_updates()?;
        Ok(true)
    }

    fn matches_any(pathspec: &Pathspec, files: &Manifest) -> bool {
        files.keys().any(|path| pathspec.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::path::Path;

    #[fixture]
    fn repository() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repository = Repository::new(dir.path(), Box::new(std::io::sink())).unwrap();
        repository.init().unwrap();
        (dir, repository)
    }

    fn pathspec(pattern: &str) -> Pathspec {
        Pathspec::parse(pattern, Path::new("")).unwrap()
    }

    fn current_status(repository: &Repository) -> WorkingDirectoryStatus {
        let index = repository.load_index().unwrap();
        repository.status().initialize(&index).unwrap()
    }

    #[rstest]
    fn test_nothing_reaches_disk_when_a_later_pattern_fails(repository: (TempDir, Repository)) {
        let (dir, repository) = repository;
        dir.child("a.txt").write_str("a").unwrap();

        let status = current_status(&repository);
        let mut session = StagingSession::open(&repository).unwrap();
        session.add_pattern(&pathspec("a.txt"), &status).unwrap();
        let result = session.add_pattern(&pathspec("missing.txt"), &status);

        assert!(matches!(result, Err(GitterError::NoMatch(pattern)) if pattern == "missing.txt"));
        assert!(repository.load_index().unwrap().is_empty());
    }

    #[rstest]
    fn test_add_pattern_accepts_an_unchanged_tracked_file(repository: (TempDir, Repository)) {
        let (dir, repository) = repository;
        dir.child("a.txt").write_str("a").unwrap();

        let mut session = StagingSession::open(&repository).unwrap();
        session.stage(&vec!["a.txt".to_string()]).unwrap();
        assert!(session.write().unwrap());

        let status = current_status(&repository);
        let mut session = StagingSession::open(&repository).unwrap();
        session.add_pattern(&pathspec("a.txt"), &status).unwrap();
        assert!(!session.write().unwrap());
    }

    #[rstest]
    fn test_add_pattern_removes_deleted_files(repository: (TempDir, Repository)) {
        let (dir, repository) = repository;
        dir.child("gone.txt").write_str("bye").unwrap();

        let mut session = StagingSession::open(&repository).unwrap();
        session.stage(&vec!["gone.txt".to_string()]).unwrap();
        session.write().unwrap();
        std::fs::remove_file(dir.child("gone.txt").path()).unwrap();

        let status = current_status(&repository);
        let mut session = StagingSession::open(&repository).unwrap();
        session.add_pattern(&pathspec("."), &status).unwrap();
        session.write().unwrap();

        assert!(repository.load_index().unwrap().is_empty());
    }

    #[rstest]
    fn test_stage_modified_skips_untracked_files(repository: (TempDir, Repository)) {
        let (dir, repository) = repository;
        dir.child("tracked.txt").write_str("v1").unwrap();

        let mut session = StagingSession::open(&repository).unwrap();
        session.stage(&vec!["tracked.txt".to_string()]).unwrap();
        session.write().unwrap();

        dir.child("tracked.txt").write_str("v2").unwrap();
        dir.child("new.txt").write_str("new").unwrap();

        let status = current_status(&repository);
        let mut session = StagingSession::open(&repository).unwrap();
        assert!(session.stage_modified(&status).unwrap());
        session.write().unwrap();

        let index = repository.load_index().unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.entry_by_path("tracked.txt").map(|entry| entry.oid.clone()),
            Some(ObjectId::digest(b"v2"))
        );
    }

    #[rstest]
    fn test_unstage_pattern_reports_removed_entries(repository: (TempDir, Repository)) {
        let (dir, repository) = repository;
        dir.child("src/a.rs").write_str("a").unwrap();
        dir.child("src/b.rs").write_str("b").unwrap();
        dir.child("top.txt").write_str("top").unwrap();

        let status = current_status(&repository);
        let mut session = StagingSession::open(&repository).unwrap();
        session.add_pattern(&pathspec("."), &status).unwrap();

        let removed = session
            .unstage_pattern(&pathspec("src"), &status.working_files)
            .unwrap();
        assert_eq!(removed, 2);
        assert!(matches!(
            session.unstage_pattern(&pathspec("nope"), &status.working_files),
            Err(GitterError::NoMatch(_))
        ));
    }

    #[rstest]
    fn test_sync_to_missing_commit_fails(repository: (TempDir, Repository)) {
        let (_dir, repository) = repository;
        let mut session = StagingSession::open(&repository).unwrap();

        let missing = ObjectId::digest(b"no such commit");
        assert!(matches!(
            session.sync_to_commit(Some(&missing)),
            Err(GitterError::ObjectNotFound(_))
        ));
    }
}
