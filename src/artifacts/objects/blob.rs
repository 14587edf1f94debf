//! Blob object
//!
//! Blobs store file content. They contain only the raw file data, without the
//! file name, which lives in the index and in commit manifests.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::{Object, RawObject};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

/// File content addressed by its SHA-1 hash
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Content decoded as UTF-8, invalid sequences replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

impl From<RawObject> for Blob {
    fn from(raw: RawObject) -> Self {
        Blob::new(raw.payload)
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn payload(&self) -> Bytes {
        self.content.clone()
    }
}
