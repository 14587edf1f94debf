use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{GitterError, GitterResult};
use derive_new::new;

/// Newest-first walk over the parent chain of a commit
#[derive(Clone, new)]
pub struct RevList<'r> {
    repository: &'r Repository,
    start: Option<ObjectId>,
    max_count: Option<usize>,
}

impl<'r> IntoIterator for RevList<'r> {
    type Item = GitterResult<Commit>;
    type IntoIter = RevListIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIter {
            repository: self.repository,
            next_oid: self.start,
            remaining: self.max_count,
        }
    }
}

#[derive(Clone)]
pub struct RevListIter<'r> {
    repository: &'r Repository,
    next_oid: Option<ObjectId>,
    remaining: Option<usize>,
}

impl Iterator for RevListIter<'_> {
    type Item = GitterResult<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }
        let oid = self.next_oid.take()?;

        match self.repository.database().parse_object_as_commit(&oid) {
            Ok(commit) => {
                self.next_oid = commit.parent().cloned();
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                Some(Ok(commit))
            }
            Err(GitterError::ObjectNotFound(oid)) => {
                tracing::warn!(%oid, "history is truncated, commit object is missing");
                None
            }
            Err(error) => Some(Err(error)),
        }
    }
}
