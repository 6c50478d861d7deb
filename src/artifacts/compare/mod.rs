//! Branch comparison
//!
//! - `config`: Explicit defaults for one comparison run
//! - `snapshot`: Branch name to commit to tree resolution
//! - `metadata`: On-disk metadata lookup behind the `MetadataResolver` trait
//! - `file_descriptor`: The before/after records emitted per change
//! - `classifier`: Turns one structural change into a descriptor pair
//! - `comparison`: The ordered result plus per-change failures

pub mod classifier;
pub mod comparison;
pub mod config;
pub mod file_descriptor;
pub mod metadata;
pub mod snapshot;
