use crate::artifacts::compare::file_descriptor::{FileDescriptor, FileDescriptorPair, file_extension};
use crate::artifacts::compare::metadata::MetadataResolver;
use crate::artifacts::diff::tree_diff::StructuralChange;
use crate::errors::{CompareError, CompareResult};

/// Builds the before/after descriptors of a structural change
#[derive(Debug)]
pub struct ChangeClassifier<'r, R: MetadataResolver + ?Sized> {
    resolver: &'r R,
}

impl<'r, R: MetadataResolver + ?Sized> ChangeClassifier<'r, R> {
    pub fn new(resolver: &'r R) -> Self {
        ChangeClassifier { resolver }
    }

    /// Describe every side of `change` that has a path
    ///
    /// Fails with `MetadataUnavailable` naming the first path whose metadata
    /// cannot be read; no partial pair is produced.
    pub fn classify(&self, change: &StructuralChange) -> CompareResult<FileDescriptorPair> {
        let source = change.from_path().map(|path| self.describe(path)).transpose()?;
        let target = change.to_path().map(|path| self.describe(path)).transpose()?;

        Ok(FileDescriptorPair::new(source, target))
    }

    fn describe(&self, path: &str) -> CompareResult<FileDescriptor> {
        let metadata = self.resolver.resolve(path).map_err(|err| {
            log::debug!("no metadata for {path}: {err:#}");
            CompareError::MetadataUnavailable(path.to_string())
        })?;

        Ok(FileDescriptor::new(
            path.to_string(),
            file_extension(path),
            metadata.last_modified,
            metadata.size_kb,
        ))
    }
}
