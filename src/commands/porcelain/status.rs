use crate::areas::repository::Repository;
use crate::errors::RepoResult;
use std::io::Write;

impl Repository {
    /// Print the branch list and the staged change set in the fixed
    /// section format, everything in name order.
    pub fn status(&self) -> RepoResult<()> {
        let mut stage = self.stage();
        stage.rehydrate()?;
        let head_branch = self.head_branch()?;

        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in self.refs().list_branches()? {
            let marker = if branch.name() == head_branch.name() {
                "*"
            } else {
                ""
            };
            writeln!(writer, "{}{}", marker, branch.name())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for file_name in stage.added().keys() {
            writeln!(writer, "{}", file_name)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for file_name in stage.removed() {
            writeln!(writer, "{}", file_name)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        writeln!(writer)?;

        Ok(())
    }
}
