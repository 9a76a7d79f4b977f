//! Ancestry queries over the commit graph
//!
//! Implements the two graph queries merge needs: the full ancestor set of a
//! commit, and the latest common ancestor of two commits. Commits are loaded
//! through a caller-supplied closure so the same engine runs against the
//! on-disk store in production and an in-memory graph in tests.
//!
//! ## Latest common ancestor
//!
//! Both inputs' ancestor sets are computed by marking each reachable commit
//! with the side (or sides) it was reached from; commits carrying both marks
//! form the intersection. Among those, the commit with the latest timestamp
//! wins; equal timestamps resolve to the lexicographically smallest digest so
//! the answer never depends on iteration order.
//!
//! ## Debug Logging
//!
//! Build with the `debug_merge` feature to trace candidate evaluation:
//! `cargo build --features debug_merge`.

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};

/// Macro for debug logging enabled by the debug_merge feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct VisitState: u8 {
        const FROM_SOURCE = 0b01;
        const FROM_TARGET = 0b10;
    }
}

/// Slim representation of a commit: only what ancestry traversal needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// Parent object IDs, first parent first (empty for the root commit)
    pub parents: Vec<ObjectId>,
    /// Commit timestamp, used to rank common ancestors
    pub timestamp: chrono::DateTime<chrono::FixedOffset>,
}

/// Ancestry query engine over a commit-loader function
///
/// The loader takes a commit id and returns its `SlimCommit`; it must succeed
/// for every id reachable through parent links, which the store invariants
/// guarantee for a well-formed repository.
pub struct AncestryFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> AncestryFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// All commits reachable from `start` through parent and second-parent
    /// edges, including `start` itself.
    ///
    /// Breadth-first frontier expansion; a commit already visited is never
    /// re-expanded, so diamond ancestry costs no duplicate work.
    pub fn ancestors(&self, start: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::new();
        let mut frontier = VecDeque::from([start.clone()]);

        while let Some(commit_id) = frontier.pop_front() {
            if !visited.insert(commit_id.clone()) {
                continue;
            }

            let commit = (self.commit_loader)(&commit_id)?;
            for parent_id in commit.parents {
                if !visited.contains(&parent_id) {
                    frontier.push_back(parent_id);
                }
            }
        }

        Ok(visited)
    }

    /// The most recent commit reachable from both `source` and `target`.
    ///
    /// Returns None only when the two commits share no history at all, which
    /// cannot happen in a repository grown from a single root commit.
    pub fn latest_common_ancestor(
        &self,
        source: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut states = HashMap::<ObjectId, VisitState>::new();
        self.mark_ancestors(source, VisitState::FROM_SOURCE, &mut states)?;
        self.mark_ancestors(target, VisitState::FROM_TARGET, &mut states)?;

        let mut best: Option<SlimCommit> = None;
        for (commit_id, state) in &states {
            if !state.contains(VisitState::FROM_SOURCE | VisitState::FROM_TARGET) {
                continue;
            }

            let candidate = (self.commit_loader)(commit_id)?;
            debug_log!(
                "Common ancestor candidate {} at {}",
                candidate.oid,
                candidate.timestamp
            );

            best = match best {
                None => Some(candidate),
                // latest timestamp wins; equal timestamps resolve to the
                // lexicographically smallest digest
                Some(current)
                    if candidate.timestamp > current.timestamp
                        || (candidate.timestamp == current.timestamp
                            && candidate.oid < current.oid) =>
                {
                    Some(candidate)
                }
                Some(current) => Some(current),
            };
        }

        debug_log!(
            "Latest common ancestor of {} and {}: {:?}",
            source,
            target,
            best.as_ref().map(|commit| commit.oid.as_ref())
        );

        Ok(best.map(|commit| commit.oid))
    }

    fn mark_ancestors(
        &self,
        start: &ObjectId,
        side: VisitState,
        states: &mut HashMap<ObjectId, VisitState>,
    ) -> anyhow::Result<()> {
        let mut frontier = VecDeque::from([start.clone()]);

        while let Some(commit_id) = frontier.pop_front() {
            let state = states
                .entry(commit_id.clone())
                .or_insert(VisitState::empty());
            if state.contains(side) {
                continue;
            }
            *state |= side;

            let commit = (self.commit_loader)(&commit_id)?;
            frontier.extend(commit.parents);
        }

        Ok(())
    }
}
