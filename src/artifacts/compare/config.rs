use crate::artifacts::diff::tree_diff::{DiffFilter, DiffOptions};
use std::path::PathBuf;

pub const DEFAULT_REPOSITORY_DIR: &str = ".";
pub const DEFAULT_OUTPUT_NAME: &str = "comparison";
pub const REPORT_EXTENSION: &str = "csv";

/// Settings for one comparison run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareConfig {
    pub repository_dir: PathBuf,
    /// Report file name without the `.csv` extension
    pub output_name: String,
    pub detect_renames: bool,
    pub diff_filter: DiffFilter,
}

impl Default for CompareConfig {
    fn default() -> Self {
        CompareConfig {
            repository_dir: PathBuf::from(DEFAULT_REPOSITORY_DIR),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            detect_renames: true,
            diff_filter: DiffFilter::all(),
        }
    }
}

impl CompareConfig {
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions::new(self.detect_renames, self.diff_filter)
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.output_name, REPORT_EXTENSION))
    }
}
