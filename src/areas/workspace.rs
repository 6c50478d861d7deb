use anyhow::Context;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// The checked-out working tree of a repository
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Absolute location of a repository-relative `/`-separated path
    pub fn resolve(&self, file_path: &str) -> PathBuf {
        file_path
            .split('/')
            .filter(|component| !component.is_empty())
            .fold(self.path.to_path_buf(), |acc, component| acc.join(component))
    }

    pub fn stat_file(&self, file_path: &str) -> anyhow::Result<Metadata> {
        let path = self.resolve(file_path);

        std::fs::metadata(&path).with_context(|| format!("Failed to stat {}", path.display()))
    }
}
