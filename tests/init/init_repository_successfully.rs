use crate::common::command::{current_branch_name, repository_dir, run_grit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_grit_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    // metadata skeleton is in place and HEAD names the default branch
    assert!(dir.path().join(".grit").is_dir());
    assert_eq!(current_branch_name(dir.path()), "master");

    // the history starts at the fixed-epoch root commit
    run_grit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"===\ncommit [0-9a-f]{40}\nDate: \w{3} \w{3} \d{1,2} \d{2}:\d{2}:\d{2} \d{4} [+-]\d{4}\ninitial commit\n",
        )?);

    // the only branch is master, checked out, with nothing staged
    run_grit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Branches ===\n*master\n"));

    Ok(())
}
