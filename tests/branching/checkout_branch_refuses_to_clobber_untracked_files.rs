use crate::common::command::{current_branch_name, repository_dir, run_grit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_branch_refuses_to_clobber_untracked_files(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_grit_command(dir.path(), &["init"]).assert().success();

    // feature stays at the empty root; master starts tracking f.txt
    run_grit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("f.txt"),
        "master content".to_string(),
    ));
    run_grit_command(dir.path(), &["add", "f.txt"])
        .assert()
        .success();
    run_grit_command(dir.path(), &["commit", "Track f.txt"])
        .assert()
        .success();

    // on feature, nothing tracks f.txt; recreate it as an untracked file
    run_grit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    assert!(!dir.path().join("f.txt").exists());
    write_file(FileSpec::new(
        dir.path().join("f.txt"),
        "precious scratch work".to_string(),
    ));

    // switching back would overwrite it; the checkout must refuse
    run_grit_command(dir.path(), &["checkout", "master"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    // nothing moved: same branch, same file content
    assert_eq!(current_branch_name(dir.path()), "feature");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("f.txt"))?,
        "precious scratch work"
    );

    Ok(())
}
