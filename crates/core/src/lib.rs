//! Shared domain types and pure logic for the setlist backend.
//!
//! Contains the error taxonomy used across crates, common type aliases, and
//! the two pieces of domain logic that have no I/O: the reorder permutation
//! check and the last-played reduction.

pub mod error;
pub mod ordering;
pub mod types;
pub mod usage;
