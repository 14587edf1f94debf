use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn hash_object(&self, object_path: &str, write: bool) -> anyhow::Result<()> {
        // paths are relative to the directory the command was run from
        let file_path = self.path().join(self.prefix()).join(object_path);
        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;

        let blob = Blob::new(content.into());
        let oid = blob.object_id();

        if write {
            self.database().store(&blob)?;
        }

        writeln!(self.writer(), "{oid}")?;

        Ok(())
    }
}
