use crate::common::command::{
    branch_tip, empty_repository_dir, gitter_commit, gitter_stdout, init_repository_dir,
    run_gitter_command,
};
use crate::common::file::{FileSpec, delete_path, write_file};
use crate::common::{blob_id, read_text};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn first_commit_records_manifest_without_parent(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "hi".to_string()));
    run_gitter_command(dir, &["add", "a.txt"]).assert().success();

    let stdout = gitter_stdout(dir, &["commit", "-m", "first"]);

    let tip = branch_tip(dir, "main");
    assert_eq!(tip.len(), 40);
    assert!(tip.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(stdout, format!("[main {}] first\n1 file(s) changed\n", &tip[..7]));

    let commit_text = gitter_stdout(dir, &["cat-file", "-p", &tip]);
    assert!(commit_text.starts_with("message: first\ntimestamp: "));
    assert!(commit_text.ends_with(&format!("parent: \nfiles:\na.txt\t{}\n", blob_id("hi"))));

    Ok(())
}

#[rstest]
fn second_commit_points_at_the_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = branch_tip(dir, "main");

    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    run_gitter_command(dir, &["add", "."]).assert().success();
    gitter_commit(dir, "second").assert().success();

    let commit_text = gitter_stdout(dir, &["cat-file", "-p", &branch_tip(dir, "main")]);
    assert!(commit_text.contains(&format!("parent: {first}\n")));
}

#[rstest]
fn commit_without_staged_changes_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));

    gitter_commit(dir, "nothing staged")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));
}

#[rstest]
fn commit_in_empty_repository_fails(empty_repository_dir: TempDir) {
    gitter_commit(empty_repository_dir.path(), "empty")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));
}

#[rstest]
fn commit_all_stages_tracked_changes_only(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    delete_path(&dir.join("a").join("2.txt"));
    write_file(FileSpec::new(dir.join("untracked.txt"), "new".to_string()));

    let stdout = gitter_stdout(dir, &["commit", "-a", "-m", "all"]);
    assert!(stdout.ends_with("] all\n2 file(s) changed\n"));

    assert_eq!(
        read_text(dir, ".gitter/index"),
        format!(
            "1.txt\t{}\na/b/3.txt\t{}\n",
            blob_id("uno"),
            blob_id("three")
        )
    );
}

#[rstest]
fn multi_line_message_is_kept(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "hi".to_string()));
    run_gitter_command(dir, &["add", "a.txt"]).assert().success();

    let stdout = gitter_stdout(dir, &["commit", "-m", "subject\n\nbody line"]);
    assert!(stdout.contains("] subject\n"));

    let log = gitter_stdout(dir, &["log"]);
    assert!(log.contains("    subject\n    \n    body line\n"));
}

#[rstest]
fn message_is_stored_as_given(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "hi".to_string()));
    run_gitter_command(dir, &["add", "a.txt"]).assert().success();

    run_gitter_command(dir, &["commit", "-m", "  padded subject  \n"])
        .assert()
        .success();

    let tip = branch_tip(dir, "main");
    let commit_text = gitter_stdout(dir, &["cat-file", "-p", &tip]);
    assert!(commit_text.starts_with("message:   padded subject  \n\ntimestamp: "));
}
