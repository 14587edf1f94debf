//! Classification of every path into staged, unstaged and untracked sets
//!
//! [`inspector::Inspector`] does the comparison over plain manifests;
//! [`status_info::Status`] gathers those manifests from a repository.

pub mod file_change;
pub mod inspector;
pub mod status_info;
