use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

/// Anything that can be written to the object store
pub trait Object {
    fn object_type(&self) -> ObjectType;

    /// The content that is hashed and stored after the header
    fn payload(&self) -> Bytes;

    fn object_id(&self) -> ObjectId {
        ObjectId::digest(&self.payload())
    }
}

/// An object as read back from disk, header already validated
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RawObject {
    pub object_type: ObjectType,
    pub size: usize,
    pub payload: Bytes,
}

impl RawObject {
    pub fn payload_as_str(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}
