//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings representing the
//! SHA-1 digest of an object's payload.
//!
//! ## Storage
//!
//! Objects are stored in `.gitter/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};
use crate::errors::{GitterError, GitterResult};
use sha1::{Digest, Sha1};
use std::path::PathBuf;
use std::str::FromStr;

/// Object identifier
///
/// A validated 40-character hexadecimal string that identifies an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Uppercase digits are accepted and normalized to lowercase.
    pub fn try_parse(id: impl AsRef<str>) -> GitterResult<Self> {
        let id = id.as_ref();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(GitterError::InvalidReference(format!(
                "invalid object ID length {} for {id:?}",
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GitterError::InvalidReference(format!(
                "invalid object ID characters: {id}"
            )));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Compute the identifier of the given raw content
    ///
    /// The digest covers the bytes exactly as given; no type or size header
    /// is mixed in.
    pub fn digest(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0[..SHORT_OBJECT_ID_LENGTH].to_string()
    }
}

impl FromStr for ObjectId {
    type Err = GitterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
