use colored::Colorize;

const LABEL_WIDTH: usize = 8;

/// Difference between a working file and its tracked version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChangeType {
    Untracked,
    Modified,
    Deleted,
}

/// Difference between the index and the last commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexChangeType {
    Added,
    Modified,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChangeType {
    Workspace(WorkspaceChangeType),
    Index(IndexChangeType),
}

impl FileChangeType {
    /// Fixed-width label printed before the path in `status`
    pub fn label(&self) -> &'static str {
        use FileChangeType::{Index, Workspace};

        match self {
            Workspace(WorkspaceChangeType::Untracked) => "",
            Workspace(WorkspaceChangeType::Modified) | Index(IndexChangeType::Modified) => {
                "modified:   "
            }
            Workspace(WorkspaceChangeType::Deleted) | Index(IndexChangeType::Deleted) => {
                "deleted:    "
            }
            Index(IndexChangeType::Added) => "new file:   ",
        }
    }
}

impl std::fmt::Display for FileChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FileChangeType::Workspace(WorkspaceChangeType::Untracked) => self.label().normal(),
            FileChangeType::Workspace(_) => self.label().red(),
            FileChangeType::Index(_) => self.label().green(),
        };
        write!(f, "{:LABEL_WIDTH$}{label}", "")
    }
}
