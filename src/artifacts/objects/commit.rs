//! Commit object
//!
//! A commit is an immutable snapshot of the whole tracked file set: a message,
//! a timestamp, up to two parent links (the second only on merge commits) and
//! a lexicographically ordered mapping of file name to blob id. History forms
//! a DAG through the parent links; `log` follows first parents only.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>            (absent on the root commit)
//! parent <second-parent-sha>     (merge commits only)
//! timestamp <unix-seconds> <utc-offset>
//! blob <blob-sha> <file-name>    (one line per entry, in name order)
//!
//! <commit message>
//! ```
//!
//! The serialized form is the digest input, so this layout is the commit's
//! versioned digest contract.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Message of the commit every repository starts from
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// The tracked file set of one commit: file name -> blob id, in name order
pub type Snapshot = BTreeMap<String, ObjectId>;

/// Immutable snapshot node of the commit graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit message (never empty except on the root commit's fixed text)
    message: String,
    /// Commit timestamp with its UTC offset
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    /// First parent (None only on the root commit)
    parent: Option<ObjectId>,
    /// Second parent, present only on merge commits
    second_parent: Option<ObjectId>,
    /// Tracked files
    blobs: Snapshot,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
        blobs: Snapshot,
    ) -> Self {
        Commit {
            message,
            timestamp,
            parent,
            second_parent,
            blobs,
        }
    }

    /// The parentless epoch commit created by `init`
    pub fn root() -> Self {
        let epoch = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH
            .with_timezone(&chrono::Local)
            .fixed_offset();

        Commit::new(
            INITIAL_COMMIT_MESSAGE.to_string(),
            epoch,
            None,
            None,
            Snapshot::new(),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    pub fn blobs(&self) -> &Snapshot {
        &self.blobs
    }

    pub fn tracks(&self, file_name: &str) -> bool {
        self.blobs.contains_key(file_name)
    }

    pub fn blob_id(&self, file_name: &str) -> Option<&ObjectId> {
        self.blobs.get(file_name)
    }

    /// Timestamp in the log record form, e.g. "Wed Dec 31 16:00:00 1969 -0800"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        for parent in [&self.parent, &self.second_parent].into_iter().flatten() {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        object_content.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (name, blob_id) in &self.blobs {
            object_content.push(format!("blob {} {}", blob_id.as_ref(), name));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), object_content.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(object_content.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let mut lines = content.lines();

        let mut parents = Vec::new();
        let mut line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;
        while let Some(parent_oid) = line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            line = lines
                .next()
                .context("Invalid commit object: missing timestamp line")?;
        }
        anyhow::ensure!(
            parents.len() <= 2,
            "Invalid commit object: more than two parents"
        );

        let timestamp_line = line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let (seconds, offset) = timestamp_line
            .split_once(' ')
            .context("Invalid commit object: invalid timestamp line")?;
        let timestamp = parse_timestamp(seconds, offset)?;

        let mut blobs = Snapshot::new();
        loop {
            let line = lines
                .next()
                .context("Invalid commit object: missing message separator")?;
            if line.is_empty() {
                break;
            }

            let entry = line
                .strip_prefix("blob ")
                .context("Invalid commit object: invalid blob line")?;
            let (blob_oid, name) = entry
                .split_once(' ')
                .context("Invalid commit object: invalid blob line")?;
            blobs.insert(name.to_string(), ObjectId::try_parse(blob_oid.to_string())?);
        }

        let message = lines.collect::<Vec<&str>>().join("\n");

        let mut parents = parents.into_iter();
        Ok(Self::new(
            message,
            timestamp,
            parents.next(),
            parents.next(),
            blobs,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

fn parse_timestamp(
    seconds: &str,
    offset: &str,
) -> anyhow::Result<chrono::DateTime<chrono::FixedOffset>> {
    let seconds: i64 = seconds
        .parse()
        .context("Invalid commit object: non-numeric timestamp")?;
    let offset = parse_utc_offset(offset)?;

    chrono::DateTime::from_timestamp(seconds, 0)
        .map(|utc| utc.with_timezone(&offset))
        .context("Invalid commit object: timestamp out of range")
}

fn parse_utc_offset(value: &str) -> anyhow::Result<chrono::FixedOffset> {
    anyhow::ensure!(value.len() == 5, "Invalid utc offset: {}", value);

    let sign = match &value[..1] {
        "+" => 1,
        "-" => -1,
        _ => anyhow::bail!("Invalid utc offset: {}", value),
    };
    let hours: i32 = value[1..3].parse().context("Invalid utc offset hours")?;
    let minutes: i32 = value[3..5].parse().context("Invalid utc offset minutes")?;

    chrono::FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .context("Utc offset out of range")
}
