pub mod blob;
pub mod branch;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a hex-encoded SHA-1 digest
pub const OBJECT_ID_LENGTH: usize = 40;
