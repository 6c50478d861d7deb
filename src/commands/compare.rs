use crate::areas::repository::Repository;
use crate::artifacts::compare::classifier::ChangeClassifier;
use crate::artifacts::compare::comparison::ComparisonResult;
use crate::artifacts::compare::config::CompareConfig;
use crate::artifacts::compare::metadata::{MetadataResolver, WorkingTreeResolver};
use crate::artifacts::compare::snapshot::Snapshot;
use crate::errors::{CompareError, CompareResult};

impl Repository {
    /// Compare two branches, describing files from the working tree
    pub fn compare(
        &self,
        source: &str,
        target: &str,
        config: &CompareConfig,
    ) -> CompareResult<ComparisonResult> {
        let resolver = WorkingTreeResolver::new(self.workspace());
        self.compare_with(source, target, config, &resolver)
    }

    /// Compare two branches with a caller-supplied metadata source
    ///
    /// Fails only when a branch, its commit, or a tree cannot be read.
    /// Changes whose metadata is missing are skipped and reported through
    /// `ComparisonResult::partial_failure`.
    pub fn compare_with<R: MetadataResolver + ?Sized>(
        &self,
        source: &str,
        target: &str,
        config: &CompareConfig,
        resolver: &R,
    ) -> CompareResult<ComparisonResult> {
        match self.refs().current_branch() {
            Ok(Some(current)) => log::debug!("working tree is on {current}"),
            Ok(None) => log::debug!("working tree has a detached HEAD"),
            Err(err) => log::debug!("unable to read HEAD: {err:#}"),
        }

        let source = Snapshot::resolve(self, source)?;
        let target = Snapshot::resolve(self, target)?;

        let changes = self
            .database()
            .tree_diff(
                Some(source.tree_oid()),
                Some(target.tree_oid()),
                config.diff_options(),
            )
            .map_err(|err| CompareError::DiffComputationError(format!("{err:#}")))?
            .into_changes();

        for change in &changes {
            log::debug!("{} {}", change.status_char(), change.key_path());
        }

        log::info!(
            "{} changes between {} ({}) and {} ({})",
            changes.len(),
            source.branch(),
            source.commit_oid().to_short_oid(),
            target.branch(),
            target.commit_oid().to_short_oid()
        );

        Ok(ComparisonResult::collect(
            changes,
            &ChangeClassifier::new(resolver),
        ))
    }
}
