use crate::common::command::{init_repository_dir, run_grit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn rm_unstages_a_staged_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(
        dir.path().join("draft.txt"),
        "work in progress".to_string(),
    ));
    run_grit_command(dir.path(), &["add", "draft.txt"])
        .assert()
        .success();

    run_grit_command(dir.path(), &["rm", "draft.txt"])
        .assert()
        .success();

    // un-staged, not staged for removal, and still on disk: the file was
    // never tracked by a commit
    run_grit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"))
        .stdout(predicate::str::contains("=== Removed Files ===\n\n"));
    assert!(dir.path().join("draft.txt").is_file());

    Ok(())
}
