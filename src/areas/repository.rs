use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::{CompareError, CompareResult};
use std::path::{Path, PathBuf};

/// Prefix of a `.git` file pointing at the real git directory (worktrees, submodules)
const GITDIR_PREFIX: &str = "gitdir:";

/// File in a linked worktree's git directory naming the shared directory
const COMMONDIR_FILE: &str = "commondir";

#[derive(Debug)]
pub struct Repository {
    path: Box<Path>,
    git_path: Box<Path>,
    common_path: Box<Path>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository whose working tree is `path`
    ///
    /// Only `path/.git` is considered; parent directories are not searched.
    pub fn open(path: &Path) -> CompareResult<Self> {
        let not_found = || CompareError::RepositoryNotFound(path.display().to_string());

        let path = path.canonicalize().map_err(|_| not_found())?;
        let git_path = Self::locate_git_dir(&path).ok_or_else(not_found)?;
        let common_path = Self::locate_common_dir(&git_path).ok_or_else(not_found)?;

        if !common_path.join("objects").is_dir() || !git_path.join("HEAD").is_file() {
            return Err(not_found());
        }

        log::debug!(
            "opened repository at {} (common dir {})",
            git_path.display(),
            common_path.display()
        );

        Ok(Repository {
            database: Database::new(common_path.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(
                git_path.clone().into_boxed_path(),
                common_path.clone().into_boxed_path(),
            ),
            path: path.into_boxed_path(),
            git_path: git_path.into_boxed_path(),
            common_path: common_path.into_boxed_path(),
        })
    }

    /// The directory holding objects and shared refs
    ///
    /// Same as the git directory, except in a linked worktree whose git
    /// directory names it in a `commondir` file (relative to itself).
    fn locate_common_dir(git_path: &Path) -> Option<PathBuf> {
        let commondir_file = git_path.join(COMMONDIR_FILE);
        if !commondir_file.is_file() {
            return Some(git_path.to_path_buf());
        }

        let content = std::fs::read_to_string(&commondir_file).ok()?;
        git_path.join(content.trim()).canonicalize().ok()
    }

    fn locate_git_dir(path: &Path) -> Option<PathBuf> {
        let dot_git = path.join(".git");

        if dot_git.is_dir() {
            return Some(dot_git);
        }

        let content = std::fs::read_to_string(&dot_git).ok()?;
        let target = content.trim().strip_prefix(GITDIR_PREFIX)?.trim();

        Some(path.join(target)).filter(|git_dir| git_dir.is_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> &Path {
        &self.git_path
    }

    pub fn common_path(&self) -> &Path {
        &self.common_path
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
