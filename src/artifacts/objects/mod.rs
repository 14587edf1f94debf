//! Object types and operations
//!
//! Every piece of content is stored as an object identified by the SHA-1 hash
//! of its payload. There are two kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Snapshot record (message, timestamp, parent, flat file manifest)
//!
//! On disk each object is written as `<type> <size>\0<payload>`. The header is
//! not part of the hashed content.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated hash shown to users
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
