use crate::areas::repository::Repository;
use crate::artifacts::history::ancestry::AncestryFinder;
use crate::artifacts::merge::plan::{MergePlan, conflict_file_content};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepoError, RepoResult};
use std::io::Write;

impl Repository {
    /// Three-way merge of the given branch into the checked-out branch.
    ///
    /// Degenerate shapes short-circuit before any merge work: a given branch
    /// that is already an ancestor of HEAD is reported as incorporated, and
    /// a HEAD that is an ancestor of the given branch fast-forwards the
    /// current branch pointer without creating a commit. Everything else
    /// goes through plan computation, the untracked-overwrite guard, plan
    /// application, and a two-parent commit.
    pub fn merge(&self, branch_name: &str) -> RepoResult<()> {
        {
            let mut stage = self.stage();
            stage.rehydrate()?;
            if !stage.is_empty() {
                return Err(RepoError::precondition("You have uncommitted changes."));
            }
        }

        let given_branch = self
            .refs()
            .read_branch(branch_name)?
            .ok_or_else(|| RepoError::precondition("A branch with that name does not exist."))?;
        let head_branch = self.head_branch()?;
        if head_branch.name() == branch_name {
            return Err(RepoError::precondition("Cannot merge a branch with itself."));
        }

        let head_commit_id = head_branch.commit_id().clone();
        let given_commit_id = given_branch.commit_id().clone();

        let database = self.database();
        let ancestor_commit_id = AncestryFinder::new(|oid: &ObjectId| database.slim_commit(oid))
            .latest_common_ancestor(&head_commit_id, &given_commit_id)?
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No common ancestor between {} and {}",
                    head_commit_id,
                    given_commit_id
                )
            })?;

        if ancestor_commit_id == given_commit_id {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if ancestor_commit_id == head_commit_id {
            self.checkout_commit(&given_commit_id)?;
            self.update_head_target(given_commit_id)?;

            let mut stage = self.stage();
            stage.rehydrate()?;
            stage.clear()?;
            stage.write_updates()?;

            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let ancestor_commit = self.read_commit(&ancestor_commit_id)?;
        let head_commit = self.read_commit(&head_commit_id)?;
        let given_commit = self.read_commit(&given_commit_id)?;

        let plan = MergePlan::compute(
            ancestor_commit.blobs(),
            head_commit.blobs(),
            given_commit.blobs(),
        );

        self.fail_on_untracked_overwrite(plan.touched_files().iter())?;
        self.apply_merge_plan(&plan)?;

        let message = format!("Merged {} into {}.", branch_name, head_branch.name());
        self.write_commit(&message, Some(given_commit_id))?;

        if plan.has_conflicts() {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Write the plan into the working tree and the staging area: adoptions
    /// are checked out from the given branch and staged, deletions staged and
    /// deleted, conflict files synthesized with both sides' content.
    fn apply_merge_plan(&self, plan: &MergePlan) -> RepoResult<()> {
        let mut stage = self.stage();
        stage.rehydrate()?;

        for (file_name, blob_id) in &plan.adoptions {
            let blob = self.read_tracked_blob(blob_id)?;
            self.workspace().write_file(file_name, blob.content())?;
            stage.stage_addition(&blob)?;
        }

        for file_name in &plan.deletions {
            stage.stage_removal(file_name)?;
            self.workspace().remove_file(file_name)?;
        }

        for (file_name, conflict) in &plan.conflicts {
            let ours = conflict
                .ours
                .as_ref()
                .map(|blob_id| self.read_tracked_blob(blob_id))
                .transpose()?;
            let theirs = conflict
                .theirs
                .as_ref()
                .map(|blob_id| self.read_tracked_blob(blob_id))
                .transpose()?;

            let content = conflict_file_content(ours.as_ref(), theirs.as_ref());
            self.workspace().write_file(file_name, &content)?;
            stage.stage_addition(&Blob::new(content, file_name.clone()))?;
        }

        stage.write_updates()?;
        Ok(())
    }
}
