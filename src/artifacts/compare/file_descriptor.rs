use chrono::NaiveDate;
use derive_new::new;

/// Rendering of `last_modified` in reports, `DD/MM/YYYY`
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One side of a change: a file as it exists on disk
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileDescriptor {
    pub path: String,
    /// Uppercased text after the final `.` of the path
    pub extension: String,
    pub last_modified: NaiveDate,
    pub size_kb: u64,
}

impl FileDescriptor {
    pub fn formatted_date(&self) -> String {
        self.last_modified.format(DATE_FORMAT).to_string()
    }
}

/// The source-branch and target-branch view of one structural change
///
/// `None` means there is no file on that side, which is distinct from a
/// file of size zero.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileDescriptorPair {
    pub source: Option<FileDescriptor>,
    pub target: Option<FileDescriptor>,
}

/// Report type of a path: everything after the last `.`, uppercased
///
/// The whole path is searched, so a path without any `.` yields the entire
/// path, and a dot in a directory name counts when the file has none.
pub fn file_extension(path: &str) -> String {
    path.rsplit('.').next().unwrap_or(path).to_uppercase()
}
