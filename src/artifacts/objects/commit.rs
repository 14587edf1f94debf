//! Commit object
//!
//! Commits record a snapshot of the staged files at a point in time. Unlike a
//! tree-based layout, the snapshot is a flat manifest of every tracked path.
//!
//! ## Format
//!
//! On disk: `commit <size>\0` followed by
//! ```text
//! message: <first message line>
//! <remaining message lines>
//! timestamp: <RFC 3339 UTC instant>
//! parent: <parent-sha or empty>
//! files:
//! <path>\t<blob-sha>
//! ```

use crate::artifacts::index::Manifest;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{GitterError, GitterResult};
use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};

const MESSAGE_PREFIX: &str = "message: ";
const TIMESTAMP_PREFIX: &str = "timestamp: ";
const PARENT_PREFIX: &str = "parent:";
const FILES_MARKER: &str = "files:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    oid: Option<ObjectId>,
    message: String,
    timestamp: DateTime<Utc>,
    parent: Option<ObjectId>,
    manifest: Manifest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Message,
    Header,
    Files,
}

impl Commit {
    /// Create a commit stamped with the current time
    ///
    /// The identifier stays unknown until the commit is written to or read
    /// back from the object store.
    pub fn new(message: String, parent: Option<ObjectId>, manifest: Manifest) -> Self {
        Self::with_timestamp(message, Utc::now(), parent, manifest)
    }

    pub fn with_timestamp(
        message: String,
        timestamp: DateTime<Utc>,
        parent: Option<ObjectId>,
        manifest: Manifest,
    ) -> Self {
        Commit {
            oid: None,
            message,
            timestamp,
            parent,
            manifest,
        }
    }

    pub fn oid(&self) -> Option<&ObjectId> {
        self.oid.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y +0000").to_string()
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }

    pub fn serialize(&self) -> String {
        let mut text = format!("{MESSAGE_PREFIX}{}\n", self.message);
        text.push_str(&format!(
            "{TIMESTAMP_PREFIX}{}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        ));

        match &self.parent {
            Some(parent) => text.push_str(&format!("{PARENT_PREFIX} {parent}\n")),
            None => text.push_str(&format!("{PARENT_PREFIX} \n")),
        }

        text.push_str(FILES_MARKER);
        text.push('\n');
        for (path, oid) in &self.manifest {
            text.push_str(&IndexEntry::new(path.clone(), oid.clone()).to_string());
            text.push('\n');
        }

        text
    }

    /// Rebuild a commit from its serialized text
    ///
    /// Every line up to the `timestamp:` line belongs to the message, so
    /// multi-line messages survive the round trip.
    pub fn parse(oid: ObjectId, text: &str) -> GitterResult<Self> {
        let malformed = |reason: &str| GitterError::MalformedObject {
            oid: oid.clone(),
            reason: reason.to_string(),
        };

        let mut section = Section::Message;
        let mut message_lines = Vec::new();
        let mut timestamp = None;
        let mut parent = None;
        let mut manifest = Manifest::new();

        for line in text.lines() {
            match section {
                Section::Message => {
                    if let Some(raw) = line.strip_prefix(TIMESTAMP_PREFIX) {
                        let parsed = DateTime::parse_from_rfc3339(raw.trim())
                            .map_err(|_| malformed("unparsable commit timestamp"))?;
                        timestamp = Some(parsed.with_timezone(&Utc));
                        section = Section::Header;
                    } else if message_lines.is_empty() {
                        message_lines.push(line.strip_prefix(MESSAGE_PREFIX).unwrap_or(line));
                    } else {
                        message_lines.push(line);
                    }
                }
                Section::Header => {
                    if let Some(raw) = line.strip_prefix(PARENT_PREFIX) {
                        let raw = raw.trim();
                        if !raw.is_empty() {
                            parent = Some(
                                ObjectId::try_parse(raw)
                                    .map_err(|_| malformed("invalid parent hash"))?,
                            );
                        }
                    } else if line == FILES_MARKER {
                        section = Section::Files;
                    }
                }
                Section::Files => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let entry = IndexEntry::parse(line)?;
                    manifest.insert(entry.path, entry.oid);
                }
            }
        }

        let timestamp = timestamp.ok_or_else(|| malformed("missing commit timestamp"))?;

        Ok(Commit {
            oid: Some(oid),
            message: message_lines.join("\n"),
            timestamp,
            parent,
            manifest,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn payload(&self) -> Bytes {
        Bytes::from(self.serialize())
    }
}
