use crate::areas::database::Database;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bitflags::bitflags;
use derive_new::new;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Blob id of the empty file, never used to pair renames
const EMPTY_BLOB_OID: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b0001;
        const DELETED = 0b0010;
        const MODIFIED = 0b0100;
        const RENAMED = 0b1000;
    }
}

impl DiffFilter {
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c.to_ascii_uppercase() {
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::DELETED,
                'M' => filter |= Self::MODIFIED,
                'R' => filter |= Self::RENAMED,
                _ => return None,
            }
        }

        Some(filter)
    }
}

impl Default for DiffFilter {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct DiffOptions {
    /// Pair a deleted and an added file with identical content into one rename
    pub detect_renames: bool,
    pub filter: DiffFilter,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions::new(true, DiffFilter::all())
    }
}

/// One path-level difference between two snapshots
///
/// Every variant carries at least one side, so a change with neither a
/// source nor a target path cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuralChange {
    Added {
        path: String,
        entry: DatabaseEntry,
    },
    Deleted {
        path: String,
        entry: DatabaseEntry,
    },
    Modified {
        path: String,
        old: DatabaseEntry,
        new: DatabaseEntry,
    },
    Renamed {
        from: String,
        to: String,
        old: DatabaseEntry,
        new: DatabaseEntry,
    },
}

impl StructuralChange {
    pub fn from_entries(
        path: String,
        old: Option<DatabaseEntry>,
        new: Option<DatabaseEntry>,
    ) -> Option<Self> {
        match (old, new) {
            (None, Some(entry)) => Some(StructuralChange::Added { path, entry }),
            (Some(entry), None) => Some(StructuralChange::Deleted { path, entry }),
            (Some(old), Some(new)) if old != new => {
                Some(StructuralChange::Modified { path, old, new })
            }
            _ => None,
        }
    }

    /// Path in the source snapshot, if the file existed there
    pub fn from_path(&self) -> Option<&str> {
        match self {
            StructuralChange::Added { .. } => None,
            StructuralChange::Deleted { path, .. } | StructuralChange::Modified { path, .. } => {
                Some(path)
            }
            StructuralChange::Renamed { from, .. } => Some(from),
        }
    }

    /// Path in the target snapshot, if the file exists there
    pub fn to_path(&self) -> Option<&str> {
        match self {
            StructuralChange::Deleted { .. } => None,
            StructuralChange::Added { path, .. } | StructuralChange::Modified { path, .. } => {
                Some(path)
            }
            StructuralChange::Renamed { to, .. } => Some(to),
        }
    }

    /// The path this change is ordered by: the target side when there is one
    pub fn key_path(&self) -> &str {
        self.to_path().or(self.from_path()).unwrap_or_default()
    }

    pub fn old_entry(&self) -> Option<&DatabaseEntry> {
        match self {
            StructuralChange::Deleted { entry, .. } => Some(entry),
            StructuralChange::Modified { old, .. } | StructuralChange::Renamed { old, .. } => {
                Some(old)
            }
            StructuralChange::Added { .. } => None,
        }
    }

    pub fn new_entry(&self) -> Option<&DatabaseEntry> {
        match self {
            StructuralChange::Added { entry, .. } => Some(entry),
            StructuralChange::Modified { new, .. } | StructuralChange::Renamed { new, .. } => {
                Some(new)
            }
            StructuralChange::Deleted { .. } => None,
        }
    }

    pub fn matches_filter(&self, filter: DiffFilter) -> bool {
        match self {
            StructuralChange::Added { .. } => filter.contains(DiffFilter::ADDED),
            StructuralChange::Deleted { .. } => filter.contains(DiffFilter::DELETED),
            StructuralChange::Modified { .. } => filter.contains(DiffFilter::MODIFIED),
            StructuralChange::Renamed { .. } => filter.contains(DiffFilter::RENAMED),
        }
    }

    pub fn status_char(&self) -> char {
        match self {
            StructuralChange::Added { .. } => 'A',
            StructuralChange::Deleted { .. } => 'D',
            StructuralChange::Modified { .. } => 'M',
            StructuralChange::Renamed { .. } => 'R',
        }
    }
}

/// Changes keyed by `StructuralChange::key_path`, iterated in byte order
pub type ChangeSet = BTreeMap<String, StructuralChange>;
pub type TreeEntryMap = BTreeMap<String, DatabaseEntry>;

#[derive(Debug)]
pub struct TreeDiff<'r> {
    database: &'r Database,
    options: DiffOptions,
    change_set: ChangeSet,
}

impl<'r> TreeDiff<'r> {
    pub fn new(database: &'r Database, options: DiffOptions) -> Self {
        TreeDiff {
            database,
            options,
            change_set: BTreeMap::new(),
        }
    }

    pub fn into_changes(self) -> Vec<StructuralChange> {
        self.change_set.into_values().collect()
    }

    pub fn compare_oids(
        &mut self,
        old: Option<&ObjectId>,
        new: Option<&ObjectId>,
        prefix: &str,
    ) -> anyhow::Result<()> {
        if old == new {
            return Ok(());
        }

        let old_tree_entries = self.inflate_oid_to_tree_entries(old)?;
        let new_tree_entries = self.inflate_oid_to_tree_entries(new)?;

        self.detect_deletions(&old_tree_entries, &new_tree_entries, prefix)?;
        self.detect_additions(&old_tree_entries, &new_tree_entries, prefix)?;

        Ok(())
    }

    /// Apply rename pairing and the change filter once all trees are compared
    pub fn finish(&mut self) {
        if self.options.detect_renames {
            self.detect_renames();
        }

        let filter = self.options.filter;
        self.change_set
            .retain(|_, change| change.matches_filter(filter));
    }

    fn inflate_oid_to_tree_entries(&self, oid: Option<&ObjectId>) -> anyhow::Result<TreeEntryMap> {
        match oid {
            None => Ok(BTreeMap::new()),
            Some(oid) => Ok(self
                .inflate_oid_to_tree(oid)?
                .into_entries()
                .collect::<BTreeMap<_, _>>()),
        }
    }

    fn inflate_oid_to_tree(&self, oid: &ObjectId) -> anyhow::Result<Tree> {
        let object = self.database.load(oid)?;

        match object.object_type {
            ObjectType::Tree => object.unpack(),
            ObjectType::Commit => {
                let commit = object.unpack::<Commit>()?;
                self.inflate_oid_to_tree(commit.tree_oid())
            }
            _ => Err(anyhow::anyhow!("Invalid tree object {}", oid)),
        }
    }

    fn detect_deletions(
        &mut self,
        old: &TreeEntryMap,
        new: &TreeEntryMap,
        prefix: &str,
    ) -> anyhow::Result<()> {
        for (name, entry) in old {
            let path = join_path(prefix, name);
            let other = new.get(name);

            if let Some(other) = other
                && other == entry
            {
                continue;
            }

            let tree_a_oid = entry.is_tree().then_some(&entry.oid);
            let tree_b_oid = other
                .filter(|other| other.is_tree())
                .map(|other| &other.oid);

            self.compare_oids(tree_a_oid, tree_b_oid, &path)?;

            let blob_a = (!entry.is_tree()).then(|| entry.clone());
            let blob_b = other.filter(|other| !other.is_tree()).cloned();

            if let Some(change) = StructuralChange::from_entries(path.clone(), blob_a, blob_b) {
                self.change_set.insert(path, change);
            }
        }

        Ok(())
    }

    fn detect_additions(
        &mut self,
        old: &TreeEntryMap,
        new: &TreeEntryMap,
        prefix: &str,
    ) -> anyhow::Result<()> {
        for (name, entry) in new {
            if old.contains_key(name) {
                continue;
            }

            let path = join_path(prefix, name);

            if entry.is_tree() {
                self.compare_oids(None, Some(&entry.oid), &path)?;
            } else {
                self.change_set.insert(
                    path.clone(),
                    StructuralChange::Added {
                        path,
                        entry: entry.clone(),
                    },
                );
            }
        }

        Ok(())
    }

    /// Pair deletions with additions of the exact same content
    ///
    /// Deletions are visited in path order and each takes the first unpaired
    /// addition (in path order) carrying the same blob id.
    fn detect_renames(&mut self) {
        let mut added_by_oid: HashMap<ObjectId, VecDeque<String>> = HashMap::new();
        for (path, change) in &self.change_set {
            if let StructuralChange::Added { entry, .. } = change
                && entry.oid.as_ref() != EMPTY_BLOB_OID
            {
                added_by_oid
                    .entry(entry.oid.clone())
                    .or_default()
                    .push_back(path.clone());
            }
        }

        let deleted = self
            .change_set
            .iter()
            .filter_map(|(path, change)| match change {
                StructuralChange::Deleted { entry, .. } => Some((path.clone(), entry.oid.clone())),
                _ => None,
            })
            .collect::<Vec<_>>();

        for (from, oid) in deleted {
            let Some(to) = added_by_oid.get_mut(&oid).and_then(|paths| paths.pop_front()) else {
                continue;
            };

            let old = self.change_set.remove(&from).and_then(|c| c.old_entry().cloned());
            let new = self.change_set.remove(&to).and_then(|c| c.new_entry().cloned());

            if let (Some(old), Some(new)) = (old, new) {
                log::debug!("detected rename {} -> {}", from, to);
                self.change_set.insert(
                    to.clone(),
                    StructuralChange::Renamed { from, to, old, new },
                );
            }
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
