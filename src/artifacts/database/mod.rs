//! Database entry and pack file types
//!
//! This module contains the types used when reading objects from the database:
//!
//! - `database_entry`: References to objects with their mode/type information
//! - `pack`: Pack index lookup and pack entry decoding
//! - `delta`: Reconstruction of deltified pack entries

pub mod database_entry;
pub mod delta;
pub mod pack;
