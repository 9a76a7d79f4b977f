use crate::common::command::{repository_dir, run_grit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

/// Both branches modified `b.txt` differently since the split point, so the
/// merge must synthesize a conflict file with HEAD's content on top and the
/// given branch's below, while the untouched `a.txt` stays as it was.
#[rstest]
fn merge_with_conflicting_changes_marks_the_file(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_grit_command(dir.path(), &["init"]).assert().success();

    // split point: a = "1", b = "1"
    write_file(FileSpec::new(dir.path().join("a.txt"), "1\n".to_string()));
    write_file(FileSpec::new(dir.path().join("b.txt"), "1\n".to_string()));
    for file_name in ["a.txt", "b.txt"] {
        run_grit_command(dir.path(), &["add", file_name])
            .assert()
            .success();
    }
    run_grit_command(dir.path(), &["commit", "Split point"])
        .assert()
        .success();
    run_grit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    // master: b = "2"
    write_file(FileSpec::new(dir.path().join("b.txt"), "2\n".to_string()));
    run_grit_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    run_grit_command(dir.path(), &["commit", "Master changes b"])
        .assert()
        .success();

    // feature: b = "3"
    run_grit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("b.txt"), "3\n".to_string()));
    run_grit_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    run_grit_command(dir.path(), &["commit", "Feature changes b"])
        .assert()
        .success();

    run_grit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    run_grit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict."));

    // deterministic conflict markers, HEAD side first
    assert_eq!(
        std::fs::read_to_string(dir.path().join("b.txt"))?,
        "<<<<<<< HEAD\n2\n=======\n3\n>>>>>>>\n"
    );
    assert_eq!(std::fs::read_to_string(dir.path().join("a.txt"))?, "1\n");

    // the merge still committed, with both parents on record
    run_grit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged feature into master."))
        .stdout(predicate::str::is_match(
            r"Merge: [0-9a-f]{7} [0-9a-f]{7}\n",
        )?);

    Ok(())
}
