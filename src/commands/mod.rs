//! Operations exposed on a `Repository`
//!
//! - `compare`: Branch-to-branch comparison producing descriptor pairs

pub mod compare;
