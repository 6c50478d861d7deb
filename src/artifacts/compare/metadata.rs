//! File metadata resolution
//!
//! Sizes and dates come from the file as it currently exists in the working
//! tree, not from the blob recorded in history. The lookup sits behind
//! `MetadataResolver` so another source can be plugged in without touching
//! the classifier.

use crate::areas::workspace::Workspace;
use chrono::{DateTime, Local, NaiveDate};
use derive_new::new;
use std::fs::Metadata;

const BYTES_PER_KB: u64 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct FileMetadata {
    pub last_modified: NaiveDate,
    pub size_kb: u64,
}

impl TryFrom<&Metadata> for FileMetadata {
    type Error = anyhow::Error;

    fn try_from(metadata: &Metadata) -> anyhow::Result<Self> {
        let modified: DateTime<Local> = metadata.modified()?.into();

        Ok(FileMetadata::new(
            modified.date_naive(),
            size_in_kb(metadata.len()),
        ))
    }
}

/// Whole kilobytes needed to hold `bytes`, rounding up
pub fn size_in_kb(bytes: u64) -> u64 {
    bytes.div_ceil(BYTES_PER_KB)
}

pub trait MetadataResolver {
    /// Metadata for a repository-relative, `/`-separated path
    fn resolve(&self, path: &str) -> anyhow::Result<FileMetadata>;
}

/// Reads metadata from the checked-out working tree
#[derive(Debug, new)]
pub struct WorkingTreeResolver<'w> {
    workspace: &'w Workspace,
}

impl MetadataResolver for WorkingTreeResolver<'_> {
    fn resolve(&self, path: &str) -> anyhow::Result<FileMetadata> {
        let metadata = self.workspace.stat_file(path)?;
        FileMetadata::try_from(&metadata)
    }
}
