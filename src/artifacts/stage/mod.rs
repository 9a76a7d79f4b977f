//! Staging file format
//!
//! The pending change set is persisted in a single binary file:
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "STGA" (4 bytes)
//!   - Version: 1 (4 bytes, big-endian)
//!   - Addition count (4 bytes, big-endian)
//!   - Removal count (4 bytes, big-endian)
//!
//! Addition entries (variable length):
//!   - Name length (4 bytes, big-endian), name bytes, 40-byte hex blob id
//!
//! Removal entries (variable length):
//!   - Name length (4 bytes, big-endian), name bytes
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;

/// Size of the SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Magic signature identifying staging files
pub const SIGNATURE: &str = "STGA";

/// Staging file format version
pub const VERSION: u32 = 1;
