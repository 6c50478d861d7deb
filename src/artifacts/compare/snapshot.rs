use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{CompareError, CompareResult};

/// The tree a branch tip points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    branch: BranchName,
    commit_oid: ObjectId,
    tree_oid: ObjectId,
}

impl Snapshot {
    /// Resolve `branch` (a short name under `refs/heads/`) to its tip tree
    pub fn resolve(repository: &Repository, branch: &str) -> CompareResult<Self> {
        let branch_not_found = || CompareError::BranchNotFound(branch.to_string());

        let branch_name = BranchName::try_parse(branch.to_string()).map_err(|err| {
            log::debug!("rejected branch name {branch:?}: {err:#}");
            branch_not_found()
        })?;

        let commit_oid = repository
            .refs()
            .read_branch(&branch_name)
            .map_err(|err| {
                log::debug!("failed to read ref for {branch_name}: {err:#}");
                branch_not_found()
            })?
            .ok_or_else(branch_not_found)?;

        let commit = repository
            .database()
            .parse_object_as_commit(&commit_oid)
            .map_err(|err| {
                log::debug!("failed to load commit {commit_oid}: {err:#}");
                CompareError::CommitNotFound(commit_oid.to_string())
            })?
            .ok_or_else(|| CompareError::CommitNotFound(commit_oid.to_string()))?;

        log::debug!(
            "{} -> {} by {}: {}",
            branch_name,
            commit_oid.to_short_oid(),
            commit.committer().unwrap_or("unknown committer"),
            commit.short_message()
        );

        Ok(Snapshot {
            branch: branch_name,
            tree_oid: commit.tree_oid().clone(),
            commit_oid,
        })
    }

    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    pub fn commit_oid(&self) -> &ObjectId {
        &self.commit_oid
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }
}
