use crate::artifacts::index::ENTRY_SEPARATOR;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{GitterError, GitterResult};
use derive_new::new;

/// A single `(path, hash)` pair of the index or of a commit manifest
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, new)]
pub struct IndexEntry {
    pub path: String,
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Parse a `path<TAB>hash` line
    ///
    /// The line must split into exactly two fields and the hash must be a
    /// valid object ID.
    pub fn parse(line: &str) -> GitterResult<Self> {
        let fields = line.split(ENTRY_SEPARATOR).collect::<Vec<_>>();

        match fields.as_slice() {
            [path, oid] if !path.is_empty() => {
                let oid = ObjectId::try_parse(oid).map_err(|_| GitterError::IndexCorruption {
                    line: line.to_string(),
                    reason: "invalid object hash".to_string(),
                })?;

                Ok(IndexEntry::new(path.to_string(), oid))
            }
            _ => Err(GitterError::IndexCorruption {
                line: line.to_string(),
                reason: format!("expected 2 tab-separated fields, found {}", fields.len()),
            }),
        }
    }
}

impl std::fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.path, ENTRY_SEPARATOR, self.oid)
    }
}
