//! Error taxonomy for repository operations
//!
//! Every porcelain operation returns a tagged `RepoError` which the command
//! dispatcher renders as a single line on stdout before exiting non-zero.
//! Merge conflicts are not part of the taxonomy: a conflicted merge still
//! commits and reports the conflict as a notice.

use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    /// A command precondition was violated (empty commit, duplicate branch,
    /// self-merge, ambiguous commit-id prefix, ...)
    #[error("{0}")]
    Precondition(String),

    /// A file, commit or blob the command needs does not exist
    #[error("{0}")]
    NotFound(String),

    /// Checkout or merge would clobber a working-tree file HEAD does not track
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedOverwrite,

    /// Infrastructure failure bubbling up from the persistence layers
    #[error("{0}")]
    Storage(#[from] anyhow::Error),
}

impl RepoError {
    pub fn precondition(message: impl Into<String>) -> Self {
        RepoError::Precondition(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        RepoError::NotFound(message.into())
    }
}

impl From<std::io::Error> for RepoError {
    fn from(error: std::io::Error) -> Self {
        RepoError::Storage(error.into())
    }
}
