use crate::common::command::{head_commit_id, repository_dir, run_grit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn reset_moves_the_branch_and_restores_the_snapshot(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_grit_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "version 1".to_string(),
    ));
    run_grit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_grit_command(dir.path(), &["commit", "First"])
        .assert()
        .success();
    let first_commit_id = head_commit_id(dir.path());

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "version 2".to_string(),
    ));
    write_file(FileSpec::new(
        dir.path().join("b.txt"),
        "new file".to_string(),
    ));
    run_grit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_grit_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    run_grit_command(dir.path(), &["commit", "Second"])
        .assert()
        .success();

    // reset by abbreviated commit id
    run_grit_command(dir.path(), &["reset", &first_commit_id[..8]])
        .assert()
        .success();

    assert_eq!(head_commit_id(dir.path()), first_commit_id);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("a.txt"))?,
        "version 1"
    );
    assert!(!dir.path().join("b.txt").exists());

    // the abandoned commit is gone from the first-parent chain
    run_grit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First"))
        .stdout(predicate::str::contains("Second").not());

    Ok(())
}

#[rstest]
fn resetting_to_an_unknown_commit_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_grit_command(dir.path(), &["init"]).assert().success();

    run_grit_command(
        dir.path(),
        &["reset", "0123456789abcdef0123456789abcdef01234567"],
    )
    .assert()
    .failure()
    .stdout(predicate::str::contains("No commit with that id exists."));

    Ok(())
}
