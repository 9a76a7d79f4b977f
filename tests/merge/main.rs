#[path = "../common/mod.rs"]
mod common;

mod merge_preconditions;
mod merge_with_conflicting_changes_marks_the_file;
