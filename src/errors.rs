//! Errors surfaced by a branch comparison
//!
//! The first four variants abort the whole comparison: without two readable
//! snapshots there is nothing meaningful to report. `MetadataUnavailable` is
//! raised per change and only skips that change, while `ChangesFailed` is the
//! aggregate notice attached to a partial result.

use thiserror::Error;

pub type CompareResult<T> = Result<T, CompareError>;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("repository not found at {0}")]
    RepositoryNotFound(String),

    #[error("could not find branch {0}")]
    BranchNotFound(String),

    #[error("could not find commit {0}")]
    CommitNotFound(String),

    #[error("failed to compute diff: {0}")]
    DiffComputationError(String),

    #[error("metadata unavailable for {0}")]
    MetadataUnavailable(String),

    #[error("failed to process {0} changes")]
    ChangesFailed(usize),
}

impl CompareError {
    /// Whether this error invalidates the whole comparison
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            CompareError::MetadataUnavailable(_) | CompareError::ChangesFailed(_)
        )
    }
}
