use crate::artifacts::compare::classifier::ChangeClassifier;
use crate::artifacts::compare::file_descriptor::FileDescriptorPair;
use crate::artifacts::compare::metadata::MetadataResolver;
use crate::artifacts::diff::tree_diff::StructuralChange;
use crate::errors::CompareError;
use derive_new::new;

/// A change that could not be described, and why
#[derive(Debug, new)]
pub struct ChangeFailure {
    pub change: StructuralChange,
    pub error: CompareError,
}

/// Descriptor pairs in change order, plus the changes that were skipped
#[derive(Debug, Default)]
pub struct ComparisonResult {
    pairs: Vec<FileDescriptorPair>,
    failures: Vec<ChangeFailure>,
}

impl ComparisonResult {
    /// Classify every change, keeping going past individual failures
    ///
    /// Output order follows the input order of `changes`.
    pub fn collect<R: MetadataResolver + ?Sized>(
        changes: impl IntoIterator<Item = StructuralChange>,
        classifier: &ChangeClassifier<'_, R>,
    ) -> Self {
        let mut result = ComparisonResult::default();

        for change in changes {
            match classifier.classify(&change) {
                Ok(pair) => result.pairs.push(pair),
                Err(error) => {
                    log::warn!("skipping {}: {}", change.key_path(), error);
                    result.failures.push(ChangeFailure::new(change, error));
                }
            }
        }

        result
    }

    pub fn pairs(&self) -> &[FileDescriptorPair] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<FileDescriptorPair> {
        self.pairs
    }

    pub fn failures(&self) -> &[ChangeFailure] {
        &self.failures
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// `ChangesFailed` when at least one change was skipped
    pub fn partial_failure(&self) -> Option<CompareError> {
        (!self.failures.is_empty()).then(|| CompareError::ChangesFailed(self.failures.len()))
    }
}
