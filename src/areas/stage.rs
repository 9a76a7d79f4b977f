//! Staging area
//!
//! The pending change set between commits: an ordered map of file name to
//! staged blob id (additions) and an ordered set of file names staged for
//! removal. A name never appears in both sets at once. Staged blob content
//! lives in its own store container next to the staging file so that commit
//! can promote blobs into permanent storage by address.
//!
//! The two sets are persisted together in one checksummed binary file (see
//! `artifacts::stage` for the format) with the same rehydrate/write_updates
//! lifecycle the reference index uses: load under a shared lock, mutate in
//! memory, write back under an exclusive lock only when something changed.

use crate::areas::database::Store;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::stage::checksum::Checksum;
use crate::artifacts::stage::{SIGNATURE, VERSION};
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug)]
pub struct Stage {
    /// Path to the staging file
    path: Box<Path>,
    /// Staged blob content, keyed by digest
    blobs: Store<Blob>,
    /// File name -> staged blob id, in name order
    added: BTreeMap<String, ObjectId>,
    /// File names staged for removal, in name order
    removed: BTreeSet<String>,
    /// Flag indicating the in-memory sets differ from the file
    changed: bool,
}

impl Stage {
    pub fn new(path: Box<Path>) -> Self {
        let blobs = Store::new(path.join("blobs").into_boxed_path());
        Stage {
            path: path.join("pending").into_boxed_path(),
            blobs,
            added: BTreeMap::new(),
            removed: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn added(&self) -> &BTreeMap<String, ObjectId> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn is_staged_for_addition(&self, file_name: &str) -> bool {
        self.added.contains_key(file_name)
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn staged_blob(&self, blob_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        self.blobs.read(blob_id.as_ref())
    }

    /// Stage a blob for addition, replacing (and evicting) any previously
    /// staged version of the same file and clearing any staged removal.
    pub fn stage_addition(&mut self, blob: &Blob) -> anyhow::Result<()> {
        let blob_id = blob.digest()?;

        if let Some(previous) = self.added.get(blob.name())
            && previous != &blob_id
        {
            self.blobs.remove(previous.as_ref())?;
        }

        self.blobs.persist(blob)?;
        self.added.insert(blob.name().to_string(), blob_id);
        self.removed.remove(blob.name());
        self.changed = true;

        Ok(())
    }

    /// Drop a staged addition and evict its blob; a no-op when not staged
    pub fn unstage_addition(&mut self, file_name: &str) -> anyhow::Result<()> {
        if let Some(blob_id) = self.added.remove(file_name) {
            self.blobs.remove(blob_id.as_ref())?;
            self.changed = true;
        }

        Ok(())
    }

    /// Stage a file for removal; displaces any staged addition for the name
    pub fn stage_removal(&mut self, file_name: &str) -> anyhow::Result<()> {
        if let Some(blob_id) = self.added.remove(file_name) {
            self.blobs.remove(blob_id.as_ref())?;
        }
        self.removed.insert(file_name.to_string());
        self.changed = true;

        Ok(())
    }

    /// Drop a staged removal; a no-op when not staged
    pub fn unstage_removal(&mut self, file_name: &str) {
        if self.removed.remove(file_name) {
            self.changed = true;
        }
    }

    /// Discard all staged blobs and reset both sets to empty
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.blobs.clear_all()?;
        self.added.clear();
        self.removed.clear();
        self.changed = true;

        Ok(())
    }

    /// Load the staging file from disk, verifying its checksum.
    ///
    /// A missing staging file is created empty so that first use works right
    /// after init.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.added.clear();
        self.removed.clear();
        self.changed = false;

        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent).context(format!(
                    "Unable to create staging directory {}",
                    parent.display()
                ))?;
            }
            std::fs::File::create(&self.path)
                .context(format!("Unable to create staging file {}", self.path.display()))?;
            return Ok(());
        }

        let mut stage_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let mut lock = file_guard::lock(&mut stage_file, file_guard::Lock::Shared, 0, 1)?;

        // an empty staging file means an empty staging area
        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock.deref_mut());

        let mut signature = [0u8; 4];
        reader.read_exact(&mut signature)?;
        anyhow::ensure!(
            signature == SIGNATURE.as_bytes(),
            "Invalid staging file signature"
        );
        let version = reader.read_u32()?;
        anyhow::ensure!(version == VERSION, "Unsupported staging file version {version}");

        let added_count = reader.read_u32()?;
        let removed_count = reader.read_u32()?;

        for _ in 0..added_count {
            let name_length = reader.read_u32()? as usize;
            let name = String::from_utf8(reader.read_bytes(name_length)?)
                .context("Staged file name is not valid UTF-8")?;
            let blob_id = String::from_utf8(reader.read_bytes(OBJECT_ID_LENGTH)?)
                .context("Staged blob id is not valid UTF-8")?;
            self.added.insert(name, ObjectId::try_parse(blob_id)?);
        }
        for _ in 0..removed_count {
            let name_length = reader.read_u32()? as usize;
            let name = String::from_utf8(reader.read_bytes(name_length)?)
                .context("Staged file name is not valid UTF-8")?;
            self.removed.insert(name);
        }

        reader.verify()
    }

    /// Persist the staging sets back to disk if anything changed
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context(format!(
                "Unable to create staging directory {}",
                parent.display()
            ))?;
        }

        let mut stage_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        let mut lock = file_guard::lock(&mut stage_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock.deref_mut());
        writer.write_all(SIGNATURE.as_bytes())?;
        writer.write_u32(VERSION)?;
        writer.write_u32(self.added.len() as u32)?;
        writer.write_u32(self.removed.len() as u32)?;

        for (name, blob_id) in &self.added {
            writer.write_u32(name.len() as u32)?;
            writer.write_all(name.as_bytes())?;
            writer.write_all(blob_id.as_ref().as_bytes())?;
        }
        for name in &self.removed {
            writer.write_u32(name.len() as u32)?;
            writer.write_all(name.as_bytes())?;
        }

        writer.write_digest()?;
        self.changed = false;

        Ok(())
    }
}
