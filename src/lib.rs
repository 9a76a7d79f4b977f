//! A miniature version-control engine: a content-addressable object store,
//! a commit DAG with ancestry queries, a persistent staging area, named
//! branch pointers and a three-way merge with conflict detection.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
