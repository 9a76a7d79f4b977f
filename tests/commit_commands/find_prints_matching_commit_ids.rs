use crate::common::command::{repository_dir, run_grit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn find_prints_matching_commit_ids(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_grit_command(dir.path(), &["init"]).assert().success();
    for file_name in ["a.txt", "b.txt"] {
        write_file(FileSpec::new(
            dir.path().join(file_name),
            file_name.to_string(),
        ));
        run_grit_command(dir.path(), &["add", file_name])
            .assert()
            .success();
        run_grit_command(dir.path(), &["commit", "Routine update"])
            .assert()
            .success();
    }

    let output = run_grit_command(dir.path(), &["find", "Routine update"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let found = String::from_utf8(output)?;

    let ids = found.lines().collect::<Vec<_>>();
    assert_eq!(ids.len(), 2);
    for id in &ids {
        assert_eq!(id.len(), 40);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
    assert_ne!(ids[0], ids[1]);

    Ok(())
}

#[rstest]
fn find_with_no_matching_message_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_grit_command(dir.path(), &["init"]).assert().success();

    run_grit_command(dir.path(), &["find", "No such message"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Found no commit with that message."));

    Ok(())
}
