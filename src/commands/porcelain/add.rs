use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::{RepoError, RepoResult};

impl Repository {
    /// Stage a working-tree file for the next commit.
    ///
    /// A file whose content matches what the current commit already tracks
    /// is not staged; staging it again would record a change that isn't one.
    /// In that case any earlier staged version and any staged removal of the
    /// name are discarded instead.
    pub fn add(&self, file_name: &str) -> RepoResult<()> {
        let mut stage = self.stage();
        stage.rehydrate()?;

        if !self.workspace().file_exists(file_name) {
            return Err(RepoError::not_found("File does not exist."));
        }

        let blob = self.workspace().parse_blob(file_name)?;
        let blob_id = blob.digest()?;
        let head_commit = self.head_commit()?;

        if head_commit.blob_id(file_name) == Some(&blob_id) {
            stage.unstage_addition(file_name)?;
            stage.unstage_removal(file_name);
        } else {
            stage.stage_addition(&blob)?;
        }

        stage.write_updates()?;
        Ok(())
    }
}
