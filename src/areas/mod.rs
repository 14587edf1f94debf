//! Core repository components
//!
//! This module contains the fundamental building blocks of a repository:
//!
//! - `database`: Content-addressed object store for blobs and commits
//! - `index`: Staging area tracking the blob each path will be committed with
//! - `refs`: Branch files and HEAD
//! - `repository`: Repository root discovery and coordination of the areas
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
