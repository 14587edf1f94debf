//! `.gitterignore` rules
//!
//! Each non-blank line is either a directory (trailing `/`), which ignores the
//! directory and everything below it, or an exact repository-relative file
//! path. The metadata directory and the ignore file itself are always ignored.

use crate::areas::repository::{GITTER_DIR, IGNORE_FILE};
use crate::errors::GitterResult;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRules {
    directories: BTreeSet<String>,
    files: BTreeSet<String>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        IgnoreRules {
            directories: BTreeSet::from([GITTER_DIR.to_string()]),
            files: BTreeSet::from([IGNORE_FILE.to_string()]),
        }
    }
}

impl IgnoreRules {
    /// Read the ignore file at the repository root, if there is one
    pub fn load(root: &Path) -> GitterResult<Self> {
        let ignore_path = root.join(IGNORE_FILE);
        if !ignore_path.is_file() {
            return Ok(Self::default());
        }

        let rules = Self::parse(&std::fs::read_to_string(ignore_path)?);
        tracing::debug!(
            directories = rules.directories.len(),
            files = rules.files.len(),
            "loaded ignore rules"
        );

        Ok(rules)
    }

    pub fn parse(content: &str) -> Self {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .fold(Self::default(), |mut rules, line| {
                match line.strip_suffix('/') {
                    Some(dir) => rules.directories.insert(dir.to_string()),
                    None => rules.files.insert(line.to_string()),
                };
                rules
            })
    }

    pub fn is_ignored(&self, relative_path: &str) -> bool {
        self.files.contains(relative_path)
            || self.directories.iter().any(|dir| {
                relative_path == dir
                    || relative_path
                        .strip_prefix(dir.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            })
    }
}
