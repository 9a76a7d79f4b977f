use crate::areas::repository::Repository;
use crate::artifacts::objects::branch::Branch;
use crate::errors::{RepoError, RepoResult};

impl Repository {
    /// Create a branch pointing at the current HEAD commit
    pub fn create_branch(&self, branch_name: &str) -> RepoResult<()> {
        if self.refs().branch_exists(branch_name) {
            return Err(RepoError::precondition(
                "A branch with that name already exists.",
            ));
        }

        let head_commit_id = self.head_branch()?.commit_id().clone();
        self.refs()
            .persist_branch(&Branch::new(branch_name.to_string(), head_commit_id))?;

        Ok(())
    }

    /// Delete a branch pointer; the commits it pointed at stay in the store
    pub fn remove_branch(&self, branch_name: &str) -> RepoResult<()> {
        if self.head_branch()?.name() == branch_name {
            return Err(RepoError::precondition("Cannot remove the current branch."));
        }
        if !self.refs().branch_exists(branch_name) {
            return Err(RepoError::precondition(
                "A branch with that name does not exist.",
            ));
        }

        self.refs().delete_branch(branch_name)?;
        Ok(())
    }
}
