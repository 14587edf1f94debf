//! Pathspec matching for `add` and `reset`
//!
//! A pathspec is one of:
//! - `.` for every file below the current directory
//! - a glob containing `*` or `?`, matched against the full path or the file
//!   name (`*` and `?` never cross a `/`, `**` does)
//! - an exact file path or a directory prefix, resolved against the directory
//!   the command was run from

use crate::errors::GitterResult;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Component, Path};

#[derive(Debug, Clone)]
enum PathspecKind {
    All,
    Glob(Regex),
    Path(String),
}

#[derive(Debug, Clone)]
pub struct Pathspec {
    raw: String,
    kind: PathspecKind,
}

impl Pathspec {
    /// Parse a user pattern typed in the `prefix` directory of the repository
    pub fn parse(pattern: &str, prefix: &Path) -> GitterResult<Self> {
        let kind = if pattern.contains(['*', '?']) {
            PathspecKind::Glob(Regex::new(&glob_to_regex(pattern))?)
        } else {
            match normalize(&prefix.join(pattern)) {
                Some(path) if path.is_empty() => PathspecKind::All,
                Some(path) => PathspecKind::Path(path),
                // escapes the repository root
                None => PathspecKind::Path(pattern.to_string()),
            }
        };

        Ok(Pathspec {
            raw: pattern.to_string(),
            kind,
        })
    }

    /// The pattern as the user typed it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &str) -> bool {
        match &self.kind {
            PathspecKind::All => true,
            PathspecKind::Glob(re) => {
                re.is_match(path)
                    || path
                        .rsplit('/')
                        .next()
                        .is_some_and(|file_name| re.is_match(file_name))
            }
            PathspecKind::Path(target) => {
                path == target
                    || path
                        .strip_prefix(target.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }

    /// Paths of `candidates` selected by this pathspec
    pub fn filter<'a>(&self, candidates: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
        candidates
            .into_iter()
            .filter(|path| self.matches(path))
            .cloned()
            .collect()
    }
}

impl std::fmt::Display for Pathspec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Collapse `.` and `..` components into a slash-separated relative path
fn normalize(path: &Path) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(parts.join("/"))
}

fn glob_to_regex(pattern: &str) -> String {
    let mut re = String::from("^");
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                re.push_str(".*");
            }
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }

    re.push('$');
    re
}
