//! Road graph CLI library.
//!
//! This crate provides the output formatting used by the `roadgraph-cli`
//! binary so it can be exercised without spawning the process.

pub mod output;
