use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use grit::areas::refs::Refs;
use grit::areas::repository::REPO_DIR;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with two committed files on master
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_grit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("2.txt"),
        "two".to_string(),
    ));

    run_grit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    run_grit_command(repository_dir.path(), &["add", "2.txt"])
        .assert()
        .success();
    run_grit_command(repository_dir.path(), &["commit", "Initial files"])
        .assert()
        .success();

    repository_dir
}

pub fn run_grit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("grit").expect("Failed to find grit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

fn refs(dir: &Path) -> Refs {
    Refs::new(dir.join(REPO_DIR).into_boxed_path())
}

/// Name of the currently checked-out branch, read through the library
pub fn current_branch_name(dir: &Path) -> String {
    refs(dir)
        .read_head_name()
        .expect("Failed to read HEAD")
        .expect("HEAD is not set")
}

/// Commit id a branch points at, read through the library
pub fn branch_tip(dir: &Path, branch_name: &str) -> String {
    refs(dir)
        .read_branch(branch_name)
        .expect("Failed to read branch")
        .unwrap_or_else(|| panic!("Branch {} does not exist", branch_name))
        .commit_id()
        .to_string()
}

/// Commit id the checked-out branch points at
pub fn head_commit_id(dir: &Path) -> String {
    let branch_name = current_branch_name(dir);
    branch_tip(dir, &branch_name)
}
