//! Git data structures and comparison algorithms
//!
//! - `branch`: Branch and ref names
//! - `compare`: Snapshots, classification and comparison results
//! - `database`: Database entries, pack files and deltas
//! - `diff`: Structural tree diffing with rename pairing
//! - `objects`: Git object types (tree, commit) and ids
//! - `report`: CSV report rendering

pub mod branch;
pub mod compare;
pub mod database;
pub mod diff;
pub mod objects;
pub mod report;
