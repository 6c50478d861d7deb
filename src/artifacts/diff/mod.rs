//! Tree comparison
//!
//! - `tree_diff`: Recursive tree-level diffing that decides which paths
//!   changed between two snapshots, with exact-content rename pairing

pub mod tree_diff;
