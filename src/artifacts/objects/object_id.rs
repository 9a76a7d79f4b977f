//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character hexadecimal strings. Blobs and commits are
//! addressed by the digest of their serialized form; branches are addressed
//! by name instead and never carry an ObjectId of their own.
//!
//! ## Format
//!
//! - Full: 40 hex characters
//! - Short: first 7 characters (used on the `Merge:` line of log records)

use crate::artifacts::objects::OBJECT_ID_LENGTH;

/// A 40-character hexadecimal SHA-1 digest identifying a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or an error if the length or characters are invalid
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Abbreviated form of the object ID (first 7 characters)
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
