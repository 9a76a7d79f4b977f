#[path = "../common/mod.rs"]
mod common;

mod adding_a_missing_file_fails;
mod rm_on_an_untracked_unstaged_file_fails;
mod rm_unstages_a_staged_file;
