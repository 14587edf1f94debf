use crate::areas::repository::Repository;
use crate::areas::refs::HEAD_REF_NAME;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{GitterError, GitterResult};

/// Alias accepted wherever `HEAD` is
const HEAD_ALIAS: &str = "@";

/// A revision relative to the tip of the current branch
///
/// Supported forms:
/// - `HEAD` (or `@`): the current commit
/// - `<revision>^`: the parent of a revision
/// - `<revision>~<n>`: the nth ancestor of a revision; `<revision>~` is the
///   parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Head,
    /// The Nth ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    pub fn parse(revision: &str) -> GitterResult<Self> {
        let invalid = || GitterError::InvalidReference(revision.to_string());

        if revision == HEAD_REF_NAME || revision == HEAD_ALIAS {
            return Ok(Revision::Head);
        }

        if let Some(captures) = regex::Regex::new(PARENT_REGEX)?.captures(revision) {
            let base = Self::parse(&captures[1])?;
            return Ok(Revision::Parent(Box::new(base)));
        }

        if let Some(captures) = regex::Regex::new(ANCESTOR_REGEX)?.captures(revision) {
            let base = Self::parse(&captures[1])?;
            let generations = match &captures[2] {
                "" => 1,
                digits => digits.parse::<usize>().map_err(|_| invalid())?,
            };
            return Ok(Revision::Ancestor(Box::new(base), generations));
        }

        Err(invalid())
    }

    /// Walk parent pointers down to the commit this revision names
    pub fn resolve(&self, repository: &Repository) -> GitterResult<ObjectId> {
        match self {
            Revision::Head => repository.refs().read_head()?.ok_or_else(|| {
                GitterError::InvalidReference(format!("{HEAD_REF_NAME}: no commits yet"))
            }),
            Revision::Parent(base_revision) => {
                Self::resolve_commit_parent(base_revision.resolve(repository)?, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::resolve_commit_parent(oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_commit_parent(oid: ObjectId, repository: &Repository) -> GitterResult<ObjectId> {
        let commit = repository.database().parse_object_as_commit(&oid)?;

        commit.parent().cloned().ok_or_else(|| {
            GitterError::InvalidReference(format!(
                "commit {} has no parent",
                oid.to_short_oid()
            ))
        })
    }
}
