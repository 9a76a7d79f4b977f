use crate::artifacts::objects::object_id::ObjectId;

/// States of modification a file can take between two commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The file points at the identical blob in both commits
    Same,
    /// The file is present in both commits with different blobs
    Modified,
    /// The file is only present in the later commit
    Added,
    /// The file is not present in the later commit
    Removed,
    /// The file is in neither commit
    Absent,
}

/// Classify one file's change between a "from" and a "to" commit, given the
/// blob id the file maps to on each side (None when untracked there).
pub fn classify(from: Option<&ObjectId>, to: Option<&ObjectId>) -> FileStatus {
    match (from, to) {
        (None, None) => FileStatus::Absent,
        (None, Some(_)) => FileStatus::Added,
        (Some(_), None) => FileStatus::Removed,
        (Some(from_id), Some(to_id)) if from_id == to_id => FileStatus::Same,
        (Some(_), Some(_)) => FileStatus::Modified,
    }
}
