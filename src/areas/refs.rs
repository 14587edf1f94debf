//! Branch references and HEAD
//!
//! ## File Format
//!
//! - `HEAD` holds the name of the current branch followed by a newline
//! - `refs/heads/<name>` holds the commit hash the branch points at, or
//!   nothing at all while the branch has no commits

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{GitterError, GitterResult};
use derive_new::new;
use std::path::Path;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository metadata directory (typically `.gitter`)
    path: Box<Path>,
}

impl Refs {
    /// Branch named by HEAD, or the default branch when HEAD is missing
    pub fn current_branch(&self) -> GitterResult<BranchName> {
        let head_path = self.head_path();
        if !head_path.exists() {
            return Ok(BranchName::default());
        }

        let content = std::fs::read_to_string(&head_path)?;
        let content = content.trim();

        if content.is_empty() {
            Ok(BranchName::default())
        } else {
            BranchName::try_parse(content)
        }
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> GitterResult<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    pub fn set_head(&self, branch_name: &BranchName) -> GitterResult<()> {
        self.update_ref_file(&self.head_path(), &format!("{branch_name}\n"))?;
        tracing::debug!(branch = %branch_name, "moved HEAD");

        Ok(())
    }

    /// Commit at the tip of the current branch
    pub fn read_head(&self) -> GitterResult<Option<ObjectId>> {
        self.read_branch(&self.current_branch()?)
    }

    pub fn update_head(&self, oid: &ObjectId) -> GitterResult<()> {
        self.update_branch(&self.current_branch()?, oid)
    }

    /// Commit a branch points at; `None` when it has no commits or is absent
    pub fn read_branch(&self, branch_name: &BranchName) -> GitterResult<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            ObjectId::try_parse(content).map(Some)
        }
    }

    pub fn update_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> GitterResult<()> {
        self.update_ref_file(&self.branch_path(branch_name), &format!("{oid}\n"))?;
        tracing::debug!(branch = %branch_name, %oid, "updated branch");

        Ok(())
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    /// Create a branch pointing at `source_oid`, or an empty one
    pub fn create_branch(
        &self,
        branch_name: &BranchName,
        source_oid: Option<&ObjectId>,
    ) -> GitterResult<()> {
        if self.branch_exists(branch_name) {
            return Err(GitterError::BranchExists(branch_name.to_string()));
        }

        let content = source_oid.map(|oid| format!("{oid}\n")).unwrap_or_default();
        self.update_ref_file(&self.branch_path(branch_name), &content)?;
        tracing::debug!(branch = %branch_name, "created branch");

        Ok(())
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> GitterResult<()> {
        // create all the parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, raw_ref)?;
        Ok(())
    }

    pub fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.heads_path().join(branch_name.as_ref()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    fn refs_in(dir: &TempDir) -> Refs {
        Refs::new(dir.path().to_path_buf().into_boxed_path())
    }

    #[test]
    fn missing_head_falls_back_to_main_without_commits() {
        let dir = TempDir::new().unwrap();
        let refs = refs_in(&dir);

        assert_eq!(refs.current_branch().unwrap(), BranchName::default());
        assert_eq!(refs.read_head().unwrap(), None);
    }

    #[test]
    fn empty_branch_file_means_no_commits() {
        let dir = TempDir::new().unwrap();
        dir.child("refs/heads/main").touch().unwrap();
        dir.child("HEAD").write_str("main\n").unwrap();
        let refs = refs_in(&dir);

        assert!(refs.branch_exists(&BranchName::default()));
        assert_eq!(refs.read_head().unwrap(), None);
    }

    #[test]
    fn head_update_moves_current_branch() {
        let dir = TempDir::new().unwrap();
        let refs = refs_in(&dir);
        let topic = BranchName::try_parse("feature/topic").unwrap();
        let oid = ObjectId::digest(b"commit");

        refs.create_branch(&topic, None).unwrap();
        refs.set_head(&topic).unwrap();
        refs.update_head(&oid).unwrap();

        dir.child("HEAD").assert("feature/topic\n");
        dir.child("refs/heads/feature/topic")
            .assert(format!("{oid}\n"));
        assert_eq!(refs.read_head().unwrap(), Some(oid));
        assert!(refs.is_current_branch(&topic).unwrap());
    }

    #[test]
    fn creating_an_existing_branch_fails() {
        let dir = TempDir::new().unwrap();
        let refs = refs_in(&dir);
        let main = BranchName::default();

        refs.create_branch(&main, None).unwrap();

        assert!(matches!(
            refs.create_branch(&main, None),
            Err(GitterError::BranchExists(name)) if name == "main"
        ));
    }
}
