use crate::areas::database::Database;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::ignore::IgnoreRules;
use crate::artifacts::index::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitterResult;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Files of the working tree, minus everything the ignore rules exclude
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    ignore: IgnoreRules,
}

impl Workspace {
    pub fn new(path: Box<Path>, ignore: IgnoreRules) -> Self {
        Workspace { path, ignore }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every non-ignored regular file, as sorted slash-separated relative paths
    pub fn list_files(&self) -> GitterResult<Vec<String>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_ignored_entry(entry));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file()
                && let Some(relative) = self.relative_path(entry.path())
            {
                files.push(relative);
            }
        }

        files.sort();
        Ok(files)
    }

    fn is_ignored_entry(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && self
                .relative_path(entry.path())
                .is_some_and(|relative| self.ignore.is_ignored(&relative))
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.path).ok()?;
        let parts = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>();

        Some(parts.join("/"))
    }

    pub fn absolute_path(&self, file_path: &str) -> PathBuf {
        self.path.join(file_path)
    }

    pub fn read_file(&self, file_path: &str) -> GitterResult<Bytes> {
        Ok(Bytes::from(std::fs::read(self.absolute_path(file_path))?))
    }

    /// Hash every working file without storing anything
    ///
    /// Files that vanish or cannot be read between listing and hashing are
    /// skipped with a warning.
    pub fn hash_files(&self) -> GitterResult<Manifest> {
        let mut manifest = Manifest::new();

        for file_path in self.list_files()? {
            match self.read_file(&file_path) {
                Ok(content) => {
                    manifest.insert(file_path, ObjectId::digest(&content));
                }
                Err(error) => {
                    tracing::warn!(path = %file_path, %error, "skipping unreadable file");
                }
            }
        }

        Ok(manifest)
    }

    pub fn write_file(&self, file_path: &str, content: &[u8]) -> GitterResult<()> {
        let path = self.absolute_path(file_path);

        if let Some(parent) = path.parent() {
            // a file standing where a directory is needed
            if parent.is_file() {
                std::fs::remove_file(parent)?;
            }
            std::fs::create_dir_all(parent)?;
        }
        if path.is_dir() {
            std::fs::remove_dir_all(&path)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Delete a file and every parent directory it leaves empty
    pub fn remove_file(&self, file_path: &str) -> GitterResult<()> {
        let path = self.absolute_path(file_path);
        if !path.is_file() {
            return Ok(());
        }

        std::fs::remove_file(&path)?;
        self.prune_empty_parent_dirs(&path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> GitterResult<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(&self.path)
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    // Deletions run first so that a path can switch between file and directory.
    pub fn apply_migration(&self, migration: &Migration, database: &Database) -> GitterResult<()> {
        for file_path in migration.deletions() {
            self.remove_file(file_path)?;
        }

        for (file_path, oid) in migration.writes() {
            let blob = database.parse_object_as_blob(oid)?;
            self.write_file(file_path, blob.content())?;
        }

        tracing::debug!(
            deleted = migration.deletions().len(),
            written = migration.writes().count(),
            "restored working tree"
        );

        Ok(())
    }
}
