use crate::areas::repository::Repository;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepoError, RepoResult};
use std::collections::HashSet;

impl Repository {
    /// Replace the working tree with the branch's snapshot and move HEAD
    /// onto the branch.
    pub fn checkout_branch(&self, branch_name: &str) -> RepoResult<()> {
        let branch = self
            .refs()
            .read_branch(branch_name)?
            .ok_or_else(|| RepoError::not_found("No such branch exists."))?;
        if self.head_branch()?.name() == branch_name {
            return Err(RepoError::precondition(
                "No need to checkout the current branch.",
            ));
        }

        self.checkout_commit(branch.commit_id())?;
        self.set_head(branch_name)?;

        let mut stage = self.stage();
        stage.rehydrate()?;
        stage.clear()?;
        stage.write_updates()?;

        Ok(())
    }

    /// Restore one file from the HEAD commit
    pub fn checkout_file_from_head(&self, file_name: &str) -> RepoResult<()> {
        let head_commit_id = self.head_branch()?.commit_id().clone();
        self.checkout_file_from_commit(file_name, &head_commit_id)
    }

    /// Overwrite or create one working-tree file from a commit's snapshot
    pub fn checkout_file_from_commit(
        &self,
        file_name: &str,
        commit_id: &ObjectId,
    ) -> RepoResult<()> {
        let commit = self
            .database()
            .commits()
            .read(commit_id.as_ref())?
            .ok_or_else(|| RepoError::not_found("No commit with that id exists."))?;
        let blob_id = commit
            .blob_id(file_name)
            .ok_or_else(|| RepoError::not_found("File does not exist in that commit."))?;

        let blob = self.read_tracked_blob(blob_id)?;
        self.workspace().write_file(file_name, blob.content())?;

        Ok(())
    }

    /// Replace the working tree with a commit's full snapshot: delete every
    /// file the current commit tracks, then materialize the target snapshot.
    pub(crate) fn checkout_commit(&self, commit_id: &ObjectId) -> RepoResult<()> {
        let commit = self
            .database()
            .commits()
            .read(commit_id.as_ref())?
            .ok_or_else(|| RepoError::not_found("No commit with that id exists."))?;

        self.fail_on_untracked_overwrite(commit.blobs().keys())?;

        let head_commit = self.head_commit()?;
        for file_name in head_commit.blobs().keys() {
            self.workspace().remove_file(file_name)?;
        }

        for (file_name, blob_id) in commit.blobs() {
            let blob = self.read_tracked_blob(blob_id)?;
            self.workspace().write_file(file_name, blob.content())?;
        }

        Ok(())
    }

    /// The write-conflict guard shared by checkout, reset and merge: refuse
    /// to touch any file that sits in the working tree without being tracked
    /// by the current HEAD commit.
    pub(crate) fn fail_on_untracked_overwrite<'a>(
        &self,
        changing_files: impl IntoIterator<Item = &'a String>,
    ) -> RepoResult<()> {
        let head_commit = self.head_commit()?;
        let untracked = self
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|file_name| !head_commit.tracks(file_name))
            .collect::<HashSet<_>>();

        if changing_files
            .into_iter()
            .any(|file_name| untracked.contains(file_name))
        {
            return Err(RepoError::UntrackedOverwrite);
        }

        Ok(())
    }

    /// Resolve a full commit id or an unambiguous prefix of one
    pub fn resolve_commit_id(&self, input: &str) -> RepoResult<ObjectId> {
        if input.len() == OBJECT_ID_LENGTH {
            let commit_id = ObjectId::try_parse(input.to_string())
                .map_err(|_| RepoError::not_found("No commit with that id exists."))?;
            if !self.database().commits().contains(commit_id.as_ref()) {
                return Err(RepoError::not_found("No commit with that id exists."));
            }
            return Ok(commit_id);
        }

        let matches = self.database().find_commits_by_prefix(input)?;
        match matches.as_slice() {
            [] => Err(RepoError::not_found("No commit with that id exists.")),
            [commit_id] => Ok(commit_id.clone()),
            _ => Err(RepoError::precondition("Ambiguous commit id prefix.")),
        }
    }
}
