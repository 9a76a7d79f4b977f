//! Commit-graph traversal and ancestry queries

pub mod ancestry;
