use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::ignore::IgnoreRules;
use crate::artifacts::status::status_info::Status;
use crate::errors::{GitterError, GitterResult};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the metadata directory at the repository root
pub const GITTER_DIR: &str = ".gitter";

/// Per-repository ignore file at the repository root
pub const IGNORE_FILE: &str = ".gitterignore";

const OBJECTS_DIR: &str = "objects";
const INDEX_FILE: &str = "index";

pub struct Repository {
    path: Box<Path>,
    /// Directory the command was run from, relative to the root
    prefix: PathBuf,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open (or prepare to initialise) the repository rooted at `path`
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> GitterResult<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        Self::at_root(path, PathBuf::new(), writer)
    }

    /// Find the repository enclosing `start` by walking up its ancestors
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> GitterResult<Self> {
        let start = start.canonicalize()?;

        let root = start
            .ancestors()
            .find(|candidate| candidate.join(GITTER_DIR).is_dir())
            .ok_or_else(|| GitterError::NotARepository(start.clone()))?
            .to_path_buf();
        let prefix = start
            .strip_prefix(&root)
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::debug!(root = %root.display(), prefix = %prefix.display(), "discovered repository");
        Self::at_root(root, prefix, writer)
    }

    fn at_root(
        path: PathBuf,
        prefix: PathBuf,
        writer: Box<dyn std::io::Write>,
    ) -> GitterResult<Self> {
        let git_path = path.join(GITTER_DIR);
        let ignore = IgnoreRules::load(&path)?;

        Ok(Repository {
            database: Database::new(git_path.join(OBJECTS_DIR).into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path(), ignore),
            refs: Refs::new(git_path.into_boxed_path()),
            path: path.into_boxed_path(),
            prefix,
            writer: RefCell::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    pub fn git_path(&self) -> PathBuf {
        self.path.join(GITTER_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.git_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn index_path(&self) -> PathBuf {
        self.git_path().join(INDEX_FILE)
    }

    /// Fresh copy of the index as it is on disk
    pub fn load_index(&self) -> GitterResult<Index> {
        let mut index = Index::new(self.index_path().into_boxed_path());
        index.rehydrate()?;
        Ok(index)
    }

    pub fn status(&'_ self) -> Status<'_> {
        Status::new(self)
    }
}
