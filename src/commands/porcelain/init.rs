use crate::areas::repository::{DEFAULT_BRANCH, Repository};
use crate::artifacts::objects::branch::Branch;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::errors::{RepoError, RepoResult};
use anyhow::Context;

impl Repository {
    /// Create the repository skeleton: the object store containers, an empty
    /// staging area, the parentless epoch root commit, and a default branch
    /// checked out as HEAD.
    pub fn init(&self) -> RepoResult<()> {
        if self.is_initialized() {
            return Err(RepoError::precondition(
                "A grit version-control system already exists in the current directory.",
            ));
        }

        std::fs::create_dir_all(self.meta_path())
            .context("Failed to create the repository metadata directory")?;

        let root_commit = Commit::root();
        let root_commit_id = root_commit.digest()?;
        self.database().commits().persist(&root_commit)?;

        self.refs()
            .persist_branch(&Branch::new(DEFAULT_BRANCH.to_string(), root_commit_id))?;
        self.set_head(DEFAULT_BRANCH)?;

        // creates the empty staging file
        let mut stage = self.stage();
        stage.rehydrate()?;

        Ok(())
    }
}
