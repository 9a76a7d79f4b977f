//! Blob object
//!
//! A blob is an immutable snapshot of one working-tree file: its raw byte
//! content plus the file name it was staged under. Both participate in the
//! digest, so the same content under two names yields two blobs.
//!
//! ## Format
//!
//! On disk: `blob <content-length>\0<name>\n<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// File content tracked by a commit, addressed by digest over (content, name)
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// Raw file content
    content: Bytes,
    /// Name of the file the content was read from
    name: String,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut blob_bytes = Vec::new();

        let header = format!("{} {}\0", self.object_type().as_str(), self.content.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(self.name.as_bytes())?;
        blob_bytes.write_all(b"\n")?;
        blob_bytes.write_all(&self.content)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut name = String::new();
        reader
            .read_line(&mut name)
            .context("Invalid blob object: missing name line")?;
        let name = name
            .strip_suffix('\n')
            .context("Invalid blob object: unterminated name line")?
            .to_string();

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(Bytes::from(content), name))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
