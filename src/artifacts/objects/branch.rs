//! Branch object
//!
//! A branch is the one mutable object kind: a name (which doubles as its
//! store address) and the id of the commit it currently targets. Repointing
//! a branch rewrites its file; nothing else about it ever changes.
//!
//! ## Format
//!
//! On disk: `branch <size>\0<name>\n<commit-sha>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// Named mutable pointer to a commit
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Branch {
    /// Branch name, unique within the repository
    name: String,
    /// Id of the commit this branch currently points at
    commit_id: ObjectId,
}

impl Branch {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commit_id(&self) -> &ObjectId {
        &self.commit_id
    }

    pub fn set_commit_id(&mut self, commit_id: ObjectId) {
        self.commit_id = commit_id;
    }
}

impl Packable for Branch {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = format!("{}\n{}", self.name, self.commit_id.as_ref());

        let mut branch_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content.len());
        branch_bytes.write_all(header.as_bytes())?;
        branch_bytes.write_all(content.as_bytes())?;

        Ok(Bytes::from(branch_bytes))
    }
}

impl Unpackable for Branch {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let (name, commit_id) = content
            .split_once('\n')
            .context("Invalid branch object: missing target line")?;

        Ok(Self::new(
            name.to_string(),
            ObjectId::try_parse(commit_id.trim().to_string())?,
        ))
    }
}

impl Object for Branch {
    fn object_type(&self) -> ObjectType {
        ObjectType::Branch
    }

    fn store_key(&self) -> anyhow::Result<String> {
        Ok(self.name.clone())
    }
}
