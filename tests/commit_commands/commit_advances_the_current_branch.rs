use crate::common::command::{head_commit_id, repository_dir, run_grit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_advances_the_current_branch(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_grit_command(dir.path(), &["init"]).assert().success();
    let root_commit_id = head_commit_id(dir.path());

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "alpha\n".to_string(),
    ));
    run_grit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_grit_command(dir.path(), &["commit", "Add alpha"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let first_commit_id = head_commit_id(dir.path());
    assert_ne!(first_commit_id, root_commit_id);

    write_file(FileSpec::new(
        dir.path().join("b.txt"),
        "beta\n".to_string(),
    ));
    run_grit_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    run_grit_command(dir.path(), &["commit", "Add beta"])
        .assert()
        .success();

    let second_commit_id = head_commit_id(dir.path());
    assert_ne!(second_commit_id, first_commit_id);

    // log walks first parents: newest first, root commit last
    let output = run_grit_command(dir.path(), &["log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let log = String::from_utf8(output)?;

    let commit_ids = log
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .collect::<Vec<_>>();
    assert_eq!(
        commit_ids,
        vec![
            second_commit_id.as_str(),
            first_commit_id.as_str(),
            root_commit_id.as_str(),
        ]
    );

    Ok(())
}

#[rstest]
fn global_log_lists_every_commit(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_grit_command(dir.path(), &["init"]).assert().success();
    for (file_name, message) in [("a.txt", "Add alpha"), ("b.txt", "Add beta")] {
        write_file(FileSpec::new(
            dir.path().join(file_name),
            file_name.to_string(),
        ));
        run_grit_command(dir.path(), &["add", file_name])
            .assert()
            .success();
        run_grit_command(dir.path(), &["commit", message])
            .assert()
            .success();
    }

    run_grit_command(dir.path(), &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initial commit"))
        .stdout(predicate::str::contains("Add alpha"))
        .stdout(predicate::str::contains("Add beta"));

    Ok(())
}
