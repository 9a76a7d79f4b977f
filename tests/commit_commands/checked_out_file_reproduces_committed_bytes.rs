use crate::common::command::{head_commit_id, repository_dir, run_grit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn checked_out_file_reproduces_committed_bytes(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_grit_command(dir.path(), &["init"]).assert().success();

    let original = "line one\n\tline two\nno trailing newline";
    write_file(FileSpec::new(
        dir.path().join("exact.txt"),
        original.to_string(),
    ));
    run_grit_command(dir.path(), &["add", "exact.txt"])
        .assert()
        .success();
    run_grit_command(dir.path(), &["commit", "Snapshot exact.txt"])
        .assert()
        .success();
    let commit_id = head_commit_id(dir.path());

    // clobber the working copy, then restore it from HEAD
    write_file(FileSpec::new(
        dir.path().join("exact.txt"),
        "garbage".to_string(),
    ));
    run_grit_command(dir.path(), &["checkout", "--", "exact.txt"])
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(dir.path().join("exact.txt"))?, original);

    // and again from the commit id, through an abbreviated prefix
    write_file(FileSpec::new(
        dir.path().join("exact.txt"),
        "more garbage".to_string(),
    ));
    run_grit_command(dir.path(), &["checkout", &commit_id[..8], "--", "exact.txt"])
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(dir.path().join("exact.txt"))?, original);

    Ok(())
}
