use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::stage::Stage;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::branch::Branch;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the repository metadata directory
pub const REPO_DIR: &str = ".grit";

/// Name of the branch `init` creates and checks out
pub const DEFAULT_BRANCH: &str = "master";

/// Repository context: every operation runs against one of these.
///
/// All persistent state is reached through the areas below; nothing is
/// process-global, so multiple repositories can coexist in one process (the
/// tests rely on that). The HEAD branch is loaded lazily and cached for the
/// lifetime of the context; every operation that repoints it refreshes the
/// cache.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    stage: RefCell<Stage>,
    workspace: Workspace,
    refs: Refs,
    head: RefCell<Option<Branch>>,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let meta_path = path.join(REPO_DIR);
        let database = Database::new(meta_path.clone().into_boxed_path());
        let stage = Stage::new(meta_path.join("stage").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(meta_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            stage: RefCell::new(stage),
            workspace,
            refs,
            head: RefCell::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn meta_path(&self) -> Box<Path> {
        self.path.join(REPO_DIR).into_boxed_path()
    }

    pub fn is_initialized(&self) -> bool {
        self.meta_path().exists()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn stage(&'_ self) -> RefMut<'_, Stage> {
        self.stage.borrow_mut()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// The currently checked-out branch, loaded from HEAD on first use
    pub fn head_branch(&self) -> anyhow::Result<Branch> {
        if let Some(branch) = self.head.borrow().as_ref() {
            return Ok(branch.clone());
        }

        let branch_name = self
            .refs
            .read_head_name()?
            .context("HEAD does not name a branch")?;
        let branch = self
            .refs
            .read_branch(&branch_name)?
            .context(format!("HEAD names a missing branch: {}", branch_name))?;

        self.head.replace(Some(branch.clone()));
        Ok(branch)
    }

    /// Point HEAD at another branch, refreshing the cached branch
    pub fn set_head(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch = self
            .refs
            .read_branch(branch_name)?
            .context(format!("Tried to set HEAD to a missing branch: {}", branch_name))?;

        self.refs.set_head(branch_name)?;
        self.head.replace(Some(branch));

        Ok(())
    }

    /// Repoint the checked-out branch at a new commit
    pub fn update_head_target(&self, commit_id: ObjectId) -> anyhow::Result<()> {
        let mut branch = self.head_branch()?;
        branch.set_commit_id(commit_id);

        self.refs.persist_branch(&branch)?;
        self.head.replace(Some(branch));

        Ok(())
    }

    /// Snapshot commit the checked-out branch points at
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let branch = self.head_branch()?;
        self.read_commit(branch.commit_id())
    }

    pub fn read_commit(&self, commit_id: &ObjectId) -> anyhow::Result<Commit> {
        self.database
            .commits()
            .read(commit_id.as_ref())?
            .context(format!("Commit {} is missing from the object store", commit_id))
    }

    pub fn read_tracked_blob(&self, blob_id: &ObjectId) -> anyhow::Result<Blob> {
        self.database
            .blobs()
            .read(blob_id.as_ref())?
            .context(format!("Blob {} is missing from the object store", blob_id))
    }
}
