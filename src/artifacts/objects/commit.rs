//! Git commit object
//!
//! Commits point at the tree snapshotting the repository at one point in
//! history. Only the tree, the committer and the message are kept.
//!
//! ## Format
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//! [other headers, possibly continued on lines starting with a space]
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::BufRead;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Raw `committer` header, kept for diagnostics
    committer: Option<String>,
    message: String,
}

impl Commit {
    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn committer(&self) -> Option<&str> {
        self.committer.as_deref()
    }

    /// First line of the commit message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = Vec::new();
        let mut reader = reader;
        reader.read_to_end(&mut content)?;

        let content = String::from_utf8_lossy(&content);
        let (headers, message) = content
            .split_once("\n\n")
            .unwrap_or((content.as_ref(), ""));

        let mut tree_oid = None;
        let mut committer = None;

        // continuation lines (e.g. inside gpgsig) start with a space
        for line in headers.lines().filter(|line| !line.starts_with(' ')) {
            match line.split_once(' ') {
                Some(("tree", oid)) => tree_oid = Some(ObjectId::try_parse(oid.to_string())?),
                Some(("committer", value)) => committer = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(Commit {
            tree_oid: tree_oid.context("Invalid commit object: missing tree line")?,
            committer,
            message: message.to_string(),
        })
    }
}
