use crate::common::command::{repository_dir, run_grit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn adding_a_missing_file_fails(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_grit_command(dir.path(), &["init"]).assert().success();

    run_grit_command(dir.path(), &["add", "phantom.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("File does not exist."));

    // nothing was staged by the failed add
    run_grit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));

    Ok(())
}
