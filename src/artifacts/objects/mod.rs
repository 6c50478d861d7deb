//! Git object types
//!
//! Git stores all content as objects identified by SHA-1 hashes. Comparing
//! branches only needs to read two of them:
//!
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (tree, parents, authorship)
//!
//! Blobs and tags are never parsed, only identified by their ID and type.

pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in binary format
pub const RAW_OBJECT_ID_LENGTH: usize = 20;
