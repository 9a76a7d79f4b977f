use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoResult;

impl Repository {
    /// Check out the given commit's full snapshot, repoint the checked-out
    /// branch at it, and clear staging.
    pub fn reset(&self, commit_id: &ObjectId) -> RepoResult<()> {
        self.checkout_commit(commit_id)?;
        self.update_head_target(commit_id.clone())?;

        let mut stage = self.stage();
        stage.rehydrate()?;
        stage.clear()?;
        stage.write_updates()?;

        Ok(())
    }
}
