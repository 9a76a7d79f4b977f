use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::errors::RepoResult;
use std::io::Write;

impl Repository {
    /// Print the first-parent chain from HEAD back to the root commit
    pub fn log(&self) -> RepoResult<()> {
        let mut commit = Some(self.head_commit()?);

        while let Some(current) = commit {
            self.write_record(&current)?;

            commit = match current.parent() {
                Some(parent_id) => Some(self.read_commit(parent_id)?),
                None => None,
            };
        }

        Ok(())
    }

    /// Print every commit in the store, in no particular order
    pub fn global_log(&self) -> RepoResult<()> {
        for commit in self.database().commits().all()? {
            self.write_record(&commit)?;
        }

        Ok(())
    }

    // The record layout is fixed output format; reproduce it byte for byte:
    //
    //   ===
    //   commit <40-hex-digest>
    //   Merge: <7-hex> <7-hex>      (merge commits only)
    //   Date: Wed Dec 31 16:00:00 1969 -0800
    //   <message>
    //   <blank>
    fn write_record(&self, commit: &Commit) -> RepoResult<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", commit.digest()?)?;
        if let (Some(parent), Some(second_parent)) = (commit.parent(), commit.second_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                parent.to_short_oid(),
                second_parent.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
