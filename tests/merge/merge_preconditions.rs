use crate::common::command::{init_repository_dir, run_grit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn merging_a_branch_with_itself_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_grit_command(dir.path(), &["merge", "master"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Cannot merge a branch with itself."));

    Ok(())
}

#[rstest]
fn merging_with_staged_changes_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_grit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("wip.txt"),
        "uncommitted".to_string(),
    ));
    run_grit_command(dir.path(), &["add", "wip.txt"])
        .assert()
        .success();

    run_grit_command(dir.path(), &["merge", "feature"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("You have uncommitted changes."));

    Ok(())
}

#[rstest]
fn merging_a_missing_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_grit_command(dir.path(), &["merge", "phantom"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "A branch with that name does not exist.",
        ));

    Ok(())
}
