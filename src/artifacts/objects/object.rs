use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

pub trait Packable {
    /// Serialize the object into its complete wire form, header included.
    ///
    /// The wire form doubles as the digest input, so the field order each
    /// implementation writes is the versioned digest contract for that kind.
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Deserialize the object body; the header has already been consumed.
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// SHA-1 digest over the serialized wire form
    fn digest(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let digest = hasher.finalize();
        ObjectId::try_parse(format!("{digest:x}"))
    }

    /// Address of the object within its store container: the digest for
    /// content-addressed objects, overridden to the name for branches.
    fn store_key(&self) -> Result<String> {
        Ok(self.digest()?.to_string())
    }
}
