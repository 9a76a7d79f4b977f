use crate::common::command::{init_repository_dir, run_grit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn rm_on_an_untracked_unstaged_file_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(
        dir.path().join("loose.txt"),
        "not tracked".to_string(),
    ));

    run_grit_command(dir.path(), &["rm", "loose.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No reason to remove the file."));

    // the file was not touched
    assert_eq!(
        std::fs::read_to_string(dir.path().join("loose.txt"))?,
        "not tracked"
    );

    Ok(())
}
