//! Branch references and HEAD
//!
//! Branches are name-addressed objects in their own store container; HEAD is
//! a symref text file naming the currently checked-out branch:
//!
//! ```text
//! ref: master
//! ```
//!
//! Branches and commits never hold in-memory references to each other; a
//! branch carries only the string id of its target commit, and HEAD carries
//! only a branch name. Ref file writes happen under an exclusive advisory
//! lock so external readers never observe a torn write.

use crate::areas::database::Store;
use crate::artifacts::objects::branch::Branch;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Regex pattern for parsing the HEAD symref
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD file
pub const HEAD_FILE_NAME: &str = "HEAD";

/// Reference manager: the branch store plus the HEAD pointer
#[derive(Debug)]
pub struct Refs {
    /// Path to the repository metadata directory
    path: Box<Path>,
    branches: Store<Branch>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        let branches = Store::new(path.join("branches").into_boxed_path());
        Refs { path, branches }
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_FILE_NAME).into_boxed_path()
    }

    /// Name of the currently checked-out branch, if HEAD has been written
    pub fn read_head_name(&self) -> anyhow::Result<Option<String>> {
        let head_path = self.head_path();
        if !head_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&head_path)
            .context(format!("Unable to read HEAD at {}", head_path.display()))?;
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?
            .captures(content)
            .context(format!("Malformed HEAD reference: {}", content))?;

        Ok(Some(symref_match[1].to_string()))
    }

    /// Point HEAD at the given branch
    pub fn set_head(&self, branch_name: &str) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), format!("ref: {}", branch_name))
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.branches.contains(name)
    }

    pub fn read_branch(&self, name: &str) -> anyhow::Result<Option<Branch>> {
        self.branches.read(name)
    }

    pub fn persist_branch(&self, branch: &Branch) -> anyhow::Result<()> {
        self.branches.persist(branch)
    }

    pub fn delete_branch(&self, name: &str) -> anyhow::Result<ObjectId> {
        let branch = self
            .branches
            .read(name)?
            .context(format!("Branch {} does not exist", name))?;

        self.branches.remove(name)?;
        Ok(branch.commit_id().clone())
    }

    /// All branches, in name order
    pub fn list_branches(&self) -> anyhow::Result<Vec<Branch>> {
        let mut branches = self.branches.all()?;
        branches.sort_by(|a, b| a.name().cmp(b.name()));

        Ok(branches)
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }
}
