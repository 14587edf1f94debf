use crate::common::blob_id;
use crate::common::command::{empty_repository_dir, gitter_stdout, run_gitter_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn hash_object_prints_digest_without_writing(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "hi".to_string()));
    let oid = blob_id("hi");

    assert_eq!(gitter_stdout(dir, &["hash-object", "a.txt"]), format!("{oid}\n"));
    assert!(!dir.join(".gitter/objects").join(&oid[..2]).exists());
}

#[rstest]
fn hash_object_write_stores_a_readable_blob(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "hi".to_string()));
    let oid = blob_id("hi");

    run_gitter_command(dir, &["hash-object", "-w", "a.txt"])
        .assert()
        .success();

    let record = std::fs::read(dir.join(".gitter/objects").join(&oid[..2]).join(&oid[2..]))
        .expect("object was not written");
    assert_eq!(record, b"blob 2\0hi");
    assert_eq!(gitter_stdout(dir, &["cat-file", "-p", &oid]), "hi");
}

#[rstest]
fn hash_object_resolves_paths_from_subdirectories(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("sub/b.txt"), "bee".to_string()));

    assert_eq!(
        gitter_stdout(&dir.join("sub"), &["hash-object", "b.txt"]),
        format!("{}\n", blob_id("bee"))
    );
}

#[rstest]
fn cat_file_of_unknown_object_fails(empty_repository_dir: TempDir) {
    run_gitter_command(
        empty_repository_dir.path(),
        &["cat-file", "-p", &blob_id("never stored")],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("object not found"));
}
