use crate::artifacts::index::Manifest;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, RawObject};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{GitterError, GitterResult};
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::Path;

/// Content-addressed object store under `.gitter/objects`
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Write a payload under the given type and return its identifier
    ///
    /// The identifier only depends on the payload, so writing the same bytes
    /// with another type overwrites the header of the existing record.
    pub fn write(&self, object_type: ObjectType, payload: &[u8]) -> GitterResult<ObjectId> {
        let oid = ObjectId::digest(payload);
        let object_path = self.path.join(oid.to_path());

        let mut record = format!("{} {}\0", object_type, payload.len()).into_bytes();
        record.extend_from_slice(payload);

        self.write_object(&object_path, &record)?;
        tracing::debug!(%oid, %object_type, size = payload.len(), "stored object");

        Ok(oid)
    }

    pub fn store(&self, object: &impl Object) -> GitterResult<ObjectId> {
        self.write(object.object_type(), &object.payload())
    }

    /// Read an object back, checking it against the expected type
    pub fn read(&self, oid: &ObjectId, expected: ObjectType) -> GitterResult<RawObject> {
        let object_path = self.path.join(oid.to_path());
        if !object_path.is_file() {
            return Err(GitterError::ObjectNotFound(oid.clone()));
        }

        let content = std::fs::read(&object_path)?;
        let malformed = |reason: &str| GitterError::MalformedObject {
            oid: oid.clone(),
            reason: reason.to_string(),
        };

        let nul = content
            .iter()
            .position(|byte| *byte == 0)
            .ok_or_else(|| malformed("missing header terminator"))?;
        let header = String::from_utf8_lossy(&content[..nul]);

        let (type_token, declared_size) = match header.split(' ').collect::<Vec<_>>().as_slice() {
            [type_token, size] => {
                let size = size
                    .parse::<usize>()
                    .map_err(|_| malformed("invalid object size"))?;
                (type_token.to_string(), size)
            }
            _ => return Err(malformed("invalid object header")),
        };

        if type_token != expected.as_str() {
            return Err(GitterError::TypeMismatch {
                expected,
                actual: type_token,
            });
        }

        let payload = Bytes::copy_from_slice(&content[nul + 1..]);
        if payload.len() != declared_size {
            return Err(GitterError::SizeMismatch {
                expected: declared_size,
                actual: payload.len(),
            });
        }

        Ok(RawObject::new(expected, declared_size, payload))
    }

    /// Whether an object is stored; `None` never touches the disk
    pub fn exists(&self, oid: Option<&ObjectId>) -> bool {
        oid.is_some_and(|oid| self.path.join(oid.to_path()).is_file())
    }

    pub fn parse_object_as_blob(&self, oid: &ObjectId) -> GitterResult<Blob> {
        Ok(Blob::from(self.read(oid, ObjectType::Blob)?))
    }

    pub fn parse_object_as_commit(&self, oid: &ObjectId) -> GitterResult<Commit> {
        let raw = self.read(oid, ObjectType::Commit)?;
        Commit::parse(oid.clone(), &raw.payload_as_str())
    }

    /// Manifest recorded by a commit, empty when there is no commit
    pub fn load_manifest(&self, oid: Option<&ObjectId>) -> GitterResult<Manifest> {
        match oid {
            Some(oid) => Ok(self.parse_object_as_commit(oid)?.into_manifest()),
            None => Ok(Manifest::new()),
        }
    }

    fn write_object(&self, object_path: &Path, record: &[u8]) -> GitterResult<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| std::io::Error::other("object path has no parent directory"))?;
        std::fs::create_dir_all(object_dir)?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)?;
        file.write_all(record)?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path)?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    fn open_store() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        (dir, database)
    }

    #[fixture]
    fn store() -> (TempDir, Database) {
        open_store()
    }

    fn plant(dir: &TempDir, oid: &ObjectId, record: &[u8]) {
        dir.child("objects")
            .child(oid.to_path())
            .write_binary(record)
            .unwrap();
    }

    #[rstest]
    fn blob_is_written_to_sharded_path_with_header(store: (TempDir, Database)) {
        let (dir, database) = store;

        let oid = database.write(ObjectType::Blob, b"hi").unwrap();

        assert_eq!(oid.as_ref(), "c22b5f9178342609428d6f51b2c5af4c0bde6a42");
        dir.child("objects/c2/2b5f9178342609428d6f51b2c5af4c0bde6a42")
            .assert(b"blob 2\0hi".as_slice());
        assert!(database.exists(Some(&oid)));
        assert!(!database.exists(None));
    }

    #[rstest]
    fn aliased_payload_keeps_last_writers_type(store: (TempDir, Database)) {
        let (_dir, database) = store;

        let blob_oid = database.write(ObjectType::Blob, b"same").unwrap();
        let commit_oid = database.write(ObjectType::Commit, b"same").unwrap();

        assert_eq!(blob_oid, commit_oid);
        assert!(database.read(&commit_oid, ObjectType::Commit).is_ok());
        assert!(matches!(
            database.read(&blob_oid, ObjectType::Blob),
            Err(GitterError::TypeMismatch {
                expected: ObjectType::Blob,
                actual
            }) if actual == "commit"
        ));
    }

    #[rstest]
    fn missing_object_is_not_found(store: (TempDir, Database)) {
        let (_dir, database) = store;
        let oid = ObjectId::digest(b"absent");

        assert!(matches!(
            database.read(&oid, ObjectType::Blob),
            Err(GitterError::ObjectNotFound(missing)) if missing == oid
        ));
    }

    #[rstest]
    #[case(b"blob 2hi".as_slice())]
    #[case(b"blob\0hi".as_slice())]
    #[case(b"blob 2 extra\0hi".as_slice())]
    #[case(b"blob two\0hi".as_slice())]
    fn broken_headers_are_malformed(store: (TempDir, Database), #[case] record: &[u8]) {
        let (dir, database) = store;
        let oid = ObjectId::digest(b"hi");
        plant(&dir, &oid, record);

        assert!(matches!(
            database.read(&oid, ObjectType::Blob),
            Err(GitterError::MalformedObject { .. })
        ));
    }

    #[rstest]
    fn foreign_type_token_is_a_type_mismatch(store: (TempDir, Database)) {
        let (dir, database) = store;
        let oid = ObjectId::digest(b"hi");
        plant(&dir, &oid, b"tree 2\0hi");

        assert!(matches!(
            database.read(&oid, ObjectType::Blob),
            Err(GitterError::TypeMismatch {
                expected: ObjectType::Blob,
                actual
            }) if actual == "tree"
        ));
    }

    #[rstest]
    fn declared_size_must_match_payload(store: (TempDir, Database)) {
        let (dir, database) = store;
        let oid = ObjectId::digest(b"hi");
        plant(&dir, &oid, b"blob 5\0hi");

        assert!(matches!(
            database.read(&oid, ObjectType::Blob),
            Err(GitterError::SizeMismatch {
                expected: 5,
                actual: 2
            })
        ));
    }

    #[rstest]
    fn commit_manifest_is_loaded(store: (TempDir, Database)) {
        let (_dir, database) = store;
        let blob_oid = database.write(ObjectType::Blob, b"content").unwrap();
        let manifest = Manifest::from([("a.txt".to_string(), blob_oid)]);
        let commit = Commit::new("m".to_string(), None, manifest.clone());

        let commit_oid = database.store(&commit).unwrap();

        assert_eq!(database.load_manifest(Some(&commit_oid)).unwrap(), manifest);
        assert!(database.load_manifest(None).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn stored_payload_reads_back_unchanged(payload in proptest::collection::vec(any::<u8>(), 0..512)) {
            let (_dir, database) = open_store();

            let oid = database.write(ObjectType::Blob, &payload).unwrap();
            let raw = database.read(&oid, ObjectType::Blob).unwrap();

            prop_assert_eq!(oid, ObjectId::digest(&payload));
            prop_assert_eq!(raw.size, payload.len());
            prop_assert_eq!(raw.payload.as_ref(), payload.as_slice());
        }
    }
}
