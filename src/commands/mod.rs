//! Command implementations
//!
//! Every user-facing operation is an `impl Repository` block in its own file
//! under `porcelain`. Each operation validates all of its preconditions
//! before its first write, returns a tagged `RepoError` on failure, and
//! prints through the repository's injected writer on success.

pub mod porcelain;
