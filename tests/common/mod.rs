#![allow(dead_code)]

pub mod command;
pub mod file;

/// SHA-1 of a file content, as gitter names blobs
pub fn blob_id(content: &str) -> String {
    use sha1::{Digest, Sha1};

    format!("{:x}", Sha1::digest(content.as_bytes()))
}

/// Read a file below the repository root as text
pub fn read_text(root: &std::path::Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
}
