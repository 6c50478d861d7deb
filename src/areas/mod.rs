//! Repository areas
//!
//! - `database`: Object database, loose objects and packs
//! - `refs`: Reference lookup (branches, HEAD, packed-refs)
//! - `repository`: Opening a repository and wiring the areas together
//! - `workspace`: The checked-out working tree on disk

pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
