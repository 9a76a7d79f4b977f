//! Checksummed staging-file I/O
//!
//! Wraps a reader or writer and hashes every byte that passes through, so the
//! staging file can carry a trailing SHA-1 that is verified on load and
//! emitted on save. A corrupted file fails `verify` instead of silently
//! resurrecting stale staging state.

use crate::artifacts::stage::CHECKSUM_SIZE;
use anyhow::Context;
use byteorder::{BigEndian, ByteOrder};
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

pub struct Checksum<T> {
    inner: T,
    hasher: Sha1,
}

impl<T> Checksum<T> {
    pub fn new(inner: T) -> Self {
        Checksum {
            inner,
            hasher: Sha1::new(),
        }
    }
}

impl<T: Read> Checksum<T> {
    pub fn read_exact(&mut self, buffer: &mut [u8]) -> anyhow::Result<()> {
        self.inner
            .read_exact(buffer)
            .context("Unexpected end of staging file")?;
        self.hasher.update(&buffer[..]);

        Ok(())
    }

    pub fn read_u32(&mut self) -> anyhow::Result<u32> {
        let mut buffer = [0u8; 4];
        self.read_exact(&mut buffer)?;

        Ok(BigEndian::read_u32(&buffer))
    }

    pub fn read_bytes(&mut self, length: usize) -> anyhow::Result<Vec<u8>> {
        let mut buffer = vec![0u8; length];
        self.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    /// Compare the trailing on-disk checksum against the bytes read so far
    pub fn verify(mut self) -> anyhow::Result<()> {
        let expected = self.hasher.clone().finalize();

        let mut stored = [0u8; CHECKSUM_SIZE];
        self.inner
            .read_exact(&mut stored)
            .context("Staging file is missing its checksum")?;

        anyhow::ensure!(
            stored == expected.as_slice(),
            "Staging file checksum mismatch"
        );

        Ok(())
    }
}

impl<T: Write> Checksum<T> {
    pub fn write_all(&mut self, buffer: &[u8]) -> anyhow::Result<()> {
        self.inner
            .write_all(buffer)
            .context("Unable to write staging file")?;
        self.hasher.update(buffer);

        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> anyhow::Result<()> {
        let mut buffer = [0u8; 4];
        BigEndian::write_u32(&mut buffer, value);

        self.write_all(&buffer)
    }

    /// Append the checksum of everything written so far
    pub fn write_digest(mut self) -> anyhow::Result<()> {
        let digest = self.hasher.clone().finalize();
        self.inner
            .write_all(&digest)
            .context("Unable to write staging file checksum")?;

        Ok(())
    }
}
