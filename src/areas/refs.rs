//! Git references (branches, HEAD)
//!
//! References are human-readable names pointing to commits. They are stored
//! either as loose files under `.git` or as lines of `.git/packed-refs`:
//!
//! - Loose: a file containing a 40-character SHA-1, or `ref: <path>` for a
//!   symbolic reference
//! - Packed: `<sha> <refname>` lines, with `#` header lines and `^<sha>`
//!   peeled-tag lines that are irrelevant for branches
//!
//! A loose ref always shadows a packed one of the same name.
//!
//! In a linked worktree `HEAD` lives in the worktree's own git directory
//! while branches and `packed-refs` live in the shared common directory.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Maximum number of symbolic hops, as in git's `MAXDEPTH`
const MAX_SYMREF_DEPTH: usize = 5;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`), holding `HEAD`
    path: Box<Path>,
    /// Directory shared by all worktrees, holding `refs/` and `packed-refs`
    common_path: Box<Path>,
}

#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef { sym_ref_name: SymRefName },
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }
}

impl Refs {
    /// Read the commit a branch points to, `None` when no such branch exists
    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        self.read_symref(&branch_name.to_sym_ref_name(), 0)
    }

    /// Follow HEAD to the ref it finally points to
    ///
    /// Returns HEAD itself when it is detached.
    pub fn current_ref(&self) -> anyhow::Result<SymRefName> {
        let mut current = SymRefName::new(HEAD_REF_NAME.to_string());

        for _ in 0..MAX_SYMREF_DEPTH {
            match SymRefOrOid::read_symref_or_oid(&self.ref_file_path(&current))? {
                Some(SymRefOrOid::SymRef { sym_ref_name }) => current = sym_ref_name,
                Some(SymRefOrOid::Oid(_)) | None => return Ok(current),
            }
        }

        anyhow::bail!("too many levels of symbolic refs from HEAD")
    }

    /// The branch checked out in the working tree, if any
    pub fn current_branch(&self) -> anyhow::Result<Option<BranchName>> {
        Ok(BranchName::try_parse_sym_ref_name(&self.current_ref()?))
    }

    fn read_symref(&self, sym_ref_name: &SymRefName, depth: usize) -> anyhow::Result<Option<ObjectId>> {
        if depth > MAX_SYMREF_DEPTH {
            anyhow::bail!(
                "too many levels of symbolic refs at {}",
                sym_ref_name.as_ref_path()
            );
        }

        let ref_path = self.ref_file_path(sym_ref_name);

        match SymRefOrOid::read_symref_or_oid(&ref_path)? {
            Some(SymRefOrOid::SymRef { sym_ref_name }) => self.read_symref(&sym_ref_name, depth + 1),
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => self.read_packed_ref(sym_ref_name),
        }
    }

    fn read_packed_ref(&self, sym_ref_name: &SymRefName) -> anyhow::Result<Option<ObjectId>> {
        let packed_refs_path = self.packed_refs_path();
        if !packed_refs_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&packed_refs_path)
            .with_context(|| format!("failed to read {:?}", packed_refs_path))?;

        content
            .lines()
            .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
            .filter_map(|line| line.split_once(' '))
            .find(|(_, name)| name.trim_end() == sym_ref_name.as_ref_path())
            .map(|(oid, _)| ObjectId::try_parse(oid.to_string()))
            .transpose()
    }

    pub fn packed_refs_path(&self) -> Box<Path> {
        self.common_path.join("packed-refs").into_boxed_path()
    }

    fn ref_file_path(&self, sym_ref_name: &SymRefName) -> PathBuf {
        match sym_ref_name.as_ref_path() {
            HEAD_REF_NAME => self.path.join(HEAD_REF_NAME),
            name => self.common_path.join(name),
        }
    }
}
