use crate::areas::repository::Repository;
use crate::errors::{RepoError, RepoResult};

impl Repository {
    /// Un-stage a staged file, or stage a tracked file for removal and
    /// delete it from the working tree.
    pub fn rm(&self, file_name: &str) -> RepoResult<()> {
        let mut stage = self.stage();
        stage.rehydrate()?;

        let staged = stage.is_staged_for_addition(file_name);
        let tracked = self.head_commit()?.tracks(file_name);
        if !staged && !tracked {
            return Err(RepoError::precondition("No reason to remove the file."));
        }

        if staged {
            stage.unstage_addition(file_name)?;
        }
        if tracked {
            stage.stage_removal(file_name)?;
            self.workspace().remove_file(file_name)?;
        }

        stage.write_updates()?;
        Ok(())
    }
}
