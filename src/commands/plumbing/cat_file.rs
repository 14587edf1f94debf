use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::GitterError;
use std::io::Write;

impl Repository {
    /// Print the payload of an object, whichever type it was stored as
    pub fn cat_file(&self, object_id: &str) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_id)?;

        let raw = match self.database().read(&oid, ObjectType::Blob) {
            Err(GitterError::TypeMismatch { expected, actual }) => {
                let stored = ObjectType::from_token(&actual)
                    .ok_or(GitterError::TypeMismatch { expected, actual })?;
                self.database().read(&oid, stored)?
            }
            result => result?,
        };

        self.writer().write_all(&raw.payload)?;

        Ok(())
    }
}
