use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::{RepoError, RepoResult};
use std::io::Write;

impl Repository {
    /// Print the ids of all commits whose message equals the argument exactly
    pub fn find(&self, message: &str) -> RepoResult<()> {
        let mut found = false;

        for commit in self.database().commits().all()? {
            if commit.message() == message {
                writeln!(self.writer(), "{}", commit.digest()?)?;
                found = true;
            }
        }

        if !found {
            return Err(RepoError::not_found("Found no commit with that message."));
        }

        Ok(())
    }
}
