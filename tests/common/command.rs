use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Empty, initialized repository
#[fixture]
pub fn empty_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitter_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with one commit tracking `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(empty_repository_dir: TempDir) -> TempDir {
    let repository_dir = empty_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_gitter_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    gitter_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_gitter_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitter").expect("Failed to find gitter binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("GITTER_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitter_commit(dir: &Path, message: &str) -> Command {
    run_gitter_command(dir, &["commit", "-m", message])
}

/// Run a command that must succeed and return its stdout
pub fn gitter_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_gitter_command(dir, args).assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is not UTF-8")
}

/// Hash stored in the branch file of the current branch
pub fn branch_tip(dir: &Path, branch: &str) -> String {
    let content = std::fs::read_to_string(dir.join(".gitter").join("refs").join("heads").join(branch))
        .expect("Failed to read branch file");
    content.trim().to_string()
}
