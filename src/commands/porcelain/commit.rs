use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepoError, RepoResult};
use anyhow::Context;

impl Repository {
    /// Commit the staged change set on top of the current HEAD commit.
    pub fn commit(&self, message: &str) -> RepoResult<()> {
        {
            let mut stage = self.stage();
            stage.rehydrate()?;
            if stage.is_empty() {
                return Err(RepoError::precondition("No changes added to the commit."));
            }
        }
        if message.is_empty() {
            return Err(RepoError::precondition("Please enter a commit message."));
        }

        self.write_commit(message, None)?;
        Ok(())
    }

    /// Build, persist and check out a commit from the staged change set.
    ///
    /// Shared by `commit` and `merge`; the given branch tip rides along as
    /// the second parent on merges. Starts from the parent's snapshot,
    /// applies staged removals then staged additions, promotes the staged
    /// blobs into permanent storage, repoints the checked-out branch and
    /// clears staging. Deliberately does not reject an empty staging area:
    /// a merge where both sides made identical changes still records its
    /// two-parent commit.
    pub(crate) fn write_commit(
        &self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> RepoResult<ObjectId> {
        let mut stage = self.stage();
        stage.rehydrate()?;

        let head_branch = self.head_branch()?;
        let parent_commit = self.read_commit(head_branch.commit_id())?;

        let mut blobs = parent_commit.blobs().clone();
        for file_name in stage.removed() {
            blobs.remove(file_name);
        }
        for (file_name, blob_id) in stage.added() {
            let blob = stage
                .staged_blob(blob_id)?
                .context(format!("Staged blob {} is missing", blob_id))?;
            self.database().blobs().persist(&blob)?;
            blobs.insert(file_name.clone(), blob_id.clone());
        }

        let commit = Commit::new(
            message.to_string(),
            chrono::Local::now().fixed_offset(),
            Some(head_branch.commit_id().clone()),
            second_parent,
            blobs,
        );
        let commit_id = commit.digest()?;
        self.database().commits().persist(&commit)?;

        self.update_head_target(commit_id.clone())?;

        stage.clear()?;
        stage.write_updates()?;

        Ok(commit_id)
    }
}
