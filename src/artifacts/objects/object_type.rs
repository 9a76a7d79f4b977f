use anyhow::Context;
use std::io::BufRead;

/// Kind tag carried in the header of every serialized object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
    Branch,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
            ObjectType::Branch => "branch",
        }
    }

    pub fn try_parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            "branch" => Ok(ObjectType::Branch),
            _ => Err(anyhow::anyhow!("Unknown object type: {}", value)),
        }
    }

    /// Consume the `<type> <size>\0` header and return the object type
    pub fn parse_header(reader: &mut impl BufRead) -> anyhow::Result<Self> {
        let mut header = Vec::new();
        reader.read_until(b'\0', &mut header)?;

        if header.pop() != Some(b'\0') {
            anyhow::bail!("Truncated object header");
        }

        let header = String::from_utf8(header).context("Object header is not valid UTF-8")?;
        let object_type = header
            .split(' ')
            .next()
            .context("Empty object header")?;

        Self::try_parse(object_type)
    }
}
