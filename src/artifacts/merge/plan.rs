//! Merge plan computation
//!
//! A `MergePlan` is the pure outcome of a three-way merge over the ancestor,
//! head and given snapshots: which files to adopt from the given branch,
//! which to delete, and which conflict. The plan touches no storage, so merge
//! behavior is testable without a repository on disk; the merge command
//! applies the plan to the working tree and staging area afterwards.

use crate::artifacts::merge::file_status::{FileStatus, classify};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

/// The two sides of a conflicted file; None where the side removed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub ours: Option<ObjectId>,
    pub theirs: Option<ObjectId>,
}

/// Per-file outcome of a three-way merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    /// Files to take from the given branch and stage for addition
    pub adoptions: BTreeMap<String, ObjectId>,
    /// Files to stage for removal and delete from the working tree
    pub deletions: BTreeSet<String>,
    /// Files both sides changed in disagreeing ways
    pub conflicts: BTreeMap<String, Conflict>,
}

impl MergePlan {
    /// Classify every file's change from ancestor to given, then reconcile
    /// each queued change against what head did to the same file.
    pub fn compute(ancestor: &Snapshot, head: &Snapshot, given: &Snapshot) -> Self {
        let mut plan = MergePlan::default();

        let mut queued = BTreeSet::new();
        for name in ancestor.keys().chain(given.keys()) {
            match classify(ancestor.get(name), given.get(name)) {
                FileStatus::Added | FileStatus::Modified | FileStatus::Removed => {
                    queued.insert(name.clone());
                }
                FileStatus::Same | FileStatus::Absent => {}
            }
        }

        for name in queued {
            let head_id = head.get(&name);
            let given_id = given.get(&name);

            if head_id == given_id {
                // both sides ended on the identical content, nothing to do
                continue;
            }

            match classify(ancestor.get(&name), head_id) {
                // head left the file alone, the given branch's change stands
                FileStatus::Same | FileStatus::Absent => match given_id {
                    Some(blob_id) => {
                        plan.adoptions.insert(name, blob_id.clone());
                    }
                    None => {
                        plan.deletions.insert(name);
                    }
                },
                // both sides changed the file and disagree
                FileStatus::Added | FileStatus::Modified | FileStatus::Removed => {
                    plan.conflicts.insert(
                        name,
                        Conflict {
                            ours: head_id.cloned(),
                            theirs: given_id.cloned(),
                        },
                    );
                }
            }
        }

        plan
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Every file name the plan would write or delete, for the
    /// untracked-overwrite guard
    pub fn touched_files(&self) -> BTreeSet<String> {
        self.adoptions
            .keys()
            .chain(self.deletions.iter())
            .chain(self.conflicts.keys())
            .cloned()
            .collect()
    }
}

/// Synthesize the content of a conflicted file: both sides' content verbatim
/// between literal conflict-boundary markers, empty where a side removed it.
pub fn conflict_file_content(ours: Option<&Blob>, theirs: Option<&Blob>) -> Bytes {
    let mut content = Vec::new();

    content.extend_from_slice(b"<<<<<<< HEAD\n");
    if let Some(blob) = ours {
        content.extend_from_slice(blob.content());
    }
    content.extend_from_slice(b"=======\n");
    if let Some(blob) = theirs {
        content.extend_from_slice(blob.content());
    }
    content.extend_from_slice(b">>>>>>>\n");

    Bytes::from(content)
}
