//! Compare the files of two git branches
//!
//! Both branch tips are read straight from the object database (loose
//! objects and packs), their trees are diffed path by path, and every
//! changed file is described with its type, date and size as found in the
//! working tree. The result is rendered as a two-sided CSV report.
//!
//! - `areas`: Repository storage (object database, refs, working tree)
//! - `artifacts`: Git objects, tree diffing, classification and reporting
//! - `commands`: Operations on a `Repository`
//! - `errors`: The typed comparison error

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
