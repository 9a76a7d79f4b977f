//! Object database
//!
//! Objects live one file per object inside a flat container directory, keyed
//! by their store address (digest for blobs and commits, name for branches).
//! Files are zlib-compressed and written atomically through a temp file
//! rename. Reads go through a process-local cache which is evicted on
//! removal, so deleted objects cannot be resurrected by a stale hit.

use crate::artifacts::history::ancestry::SlimCommit;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Folder-backed store for one object kind, with a read-through cache
#[derive(Debug)]
pub struct Store<T> {
    path: Box<Path>,
    cache: RefCell<HashMap<String, T>>,
}

impl<T: Object + Unpackable + Clone> Store<T> {
    pub fn new(path: Box<Path>) -> Self {
        Store {
            path,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.path
    }

    /// Write the object under its store address.
    ///
    /// Existing files are overwritten: for content-addressed objects the
    /// content is identical anyway, and branches rely on the overwrite to
    /// repoint.
    pub fn persist(&self, object: &T) -> anyhow::Result<()> {
        self.ensure_folder()?;

        let key = object.store_key()?;
        let object_path = self.path.join(&key);
        let object_content = Self::compress(object.serialize()?)?;

        self.write_object(object_path, object_content)?;
        self.cache.borrow_mut().insert(key, object.clone());

        Ok(())
    }

    /// Read the object stored under the given address.
    ///
    /// An empty or absent address yields None rather than an error; the empty
    /// address is how absent parent links read as "no object".
    pub fn read(&self, key: &str) -> anyhow::Result<Option<T>> {
        if key.is_empty() {
            return Ok(None);
        }
        if let Some(object) = self.cache.borrow().get(key) {
            return Ok(Some(object.clone()));
        }

        let object_path = self.path.join(key);
        if !object_path.exists() {
            return Ok(None);
        }

        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;
        let object_content = Self::decompress(object_content.into())?;

        let mut object_reader = Cursor::new(object_content);
        ObjectType::parse_header(&mut object_reader)?;
        let object = T::deserialize(object_reader)?;

        self.cache.borrow_mut().insert(key.to_string(), object.clone());
        Ok(Some(object))
    }

    pub fn contains(&self, key: &str) -> bool {
        !key.is_empty() && (self.cache.borrow().contains_key(key) || self.path.join(key).exists())
    }

    /// Delete the object and evict its cache entry
    pub fn remove(&self, key: &str) -> anyhow::Result<()> {
        let object_path = self.path.join(key);
        if object_path.is_file() {
            std::fs::remove_file(&object_path).context(format!(
                "Unable to remove object file {}",
                object_path.display()
            ))?;
        }
        self.cache.borrow_mut().remove(key);

        Ok(())
    }

    /// Addresses of every stored object, in no particular order
    pub fn keys(&self) -> anyhow::Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        Ok(WalkDir::new(self.path.as_ref())
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| !name.starts_with("tmp-obj-"))
            .collect::<Vec<_>>())
    }

    /// Unordered traversal of all stored objects
    pub fn all(&self) -> anyhow::Result<Vec<T>> {
        self.keys()?
            .into_iter()
            .map(|key| {
                self.read(&key)?
                    .context(format!("Object {} disappeared during traversal", key))
            })
            .collect()
    }

    pub fn clear_all(&self) -> anyhow::Result<()> {
        for key in self.keys()? {
            self.remove(&key)?;
        }

        Ok(())
    }

    fn ensure_folder(&self) -> anyhow::Result<()> {
        if !self.path.exists() {
            std::fs::create_dir_all(&self.path).context(format!(
                "Unable to create object directory {}",
                self.path.display()
            ))?;
        }

        Ok(())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file over the object file to make the write atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

/// The digest-keyed half of the object store: commits and tracked blobs
#[derive(Debug)]
pub struct Database {
    commits: Store<Commit>,
    blobs: Store<Blob>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            commits: Store::new(path.join("commits").into_boxed_path()),
            blobs: Store::new(path.join("blobs").into_boxed_path()),
        }
    }

    pub fn commits(&self) -> &Store<Commit> {
        &self.commits
    }

    pub fn blobs(&self) -> &Store<Blob> {
        &self.blobs
    }

    /// Find all commits whose id starts with the given prefix.
    ///
    /// Used to resolve abbreviated commit ids; more than one match means the
    /// prefix is ambiguous and the caller must reject it.
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self
            .commits
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .filter_map(|key| ObjectId::try_parse(key).ok())
            .collect())
    }

    /// Load the slim form of a commit for ancestry traversal
    pub fn slim_commit(&self, commit_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        let commit = self
            .commits
            .read(commit_id.as_ref())?
            .context(format!("Commit {} is missing from the object store", commit_id))?;

        Ok(SlimCommit {
            oid: commit_id.clone(),
            parents: commit
                .parent()
                .into_iter()
                .chain(commit.second_parent())
                .cloned()
                .collect(),
            timestamp: commit.timestamp(),
        })
    }
}
