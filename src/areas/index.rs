//! Staging area
//!
//! The index tracks which blob each path will point at in the next commit.
//! It is persisted as a text file with one `path<TAB>hash` line per entry,
//! always rewritten wholesale in path order.

use crate::artifacts::index::Manifest;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitterResult;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitter/index`)
    path: Box<Path>,
    /// Tracked files mapped by path
    entries: BTreeMap<String, IndexEntry>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_changed(&self) -> bool {
        self.changed
    }

    /// Load the index from disk
    ///
    /// A missing or empty file yields an empty index. Blank lines are skipped;
    /// any other line must be a `path<TAB>hash` pair.
    pub fn rehydrate(&mut self) -> GitterResult<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)?;
        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            let entry = IndexEntry::parse(line)?;
            self.entries.insert(entry.path.clone(), entry);
        }

        tracing::debug!(entries = self.entries.len(), "loaded index");
        Ok(())
    }

    /// Overwrite the index file with the in-memory entries
    pub fn write_updates(&mut self) -> GitterResult<()> {
        let content = self
            .entries
            .values()
            .map(|entry| format!("{entry}\n"))
            .collect::<String>();

        std::fs::write(&self.path, content)?;
        self.changed = false;

        tracing::debug!(entries = self.entries.len(), "saved index");
        Ok(())
    }

    pub fn add(&mut self, path: String, oid: ObjectId) {
        let entry = IndexEntry::new(path.clone(), oid);

        if self.entries.get(&path) != Some(&entry) {
            self.entries.insert(path, entry);
            self.changed = true;
        }
    }

    /// Drop an entry, reporting whether it was present
    pub fn remove(&mut self, path: &str) -> bool {
        let removed = self.entries.remove(path).is_some();
        self.changed |= removed;
        removed
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.changed |= !self.entries.is_empty();
        self.entries.clear();
    }

    /// Replace every entry with the given manifest
    pub fn replace(&mut self, manifest: &Manifest) {
        self.entries = manifest
            .iter()
            .map(|(path, oid)| (path.clone(), IndexEntry::new(path.clone(), oid.clone())))
            .collect();
        self.changed = true;
    }

    pub fn manifest(&self) -> Manifest {
        self.entries
            .values()
            .map(|entry| (entry.path.clone(), entry.oid.clone()))
            .collect()
    }
}
