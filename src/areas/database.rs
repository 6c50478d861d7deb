//! Git object database (read side)
//!
//! Objects are looked up first as loose files under `.git/objects`, then in
//! every pack under `.git/objects/pack`. Packs are opened lazily on the first
//! lookup that misses the loose store.

use crate::artifacts::database::delta::apply_delta;
use crate::artifacts::database::pack::{Pack, PackEntry};
use crate::artifacts::diff::tree_diff::{DiffOptions, TreeDiff};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::RawObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::cell::OnceCell;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// Upper bound on delta chains, well above git's default `--depth=50`
const MAX_DELTA_CHAIN: usize = 4096;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    packs: OnceCell<Vec<Pack>>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            path,
            packs: OnceCell::new(),
        }
    }

    pub fn tree_diff(
        &self,
        old_oid: Option<&ObjectId>,
        new_oid: Option<&ObjectId>,
        options: DiffOptions,
    ) -> anyhow::Result<TreeDiff<'_>> {
        let mut tree_diff = TreeDiff::new(self, options);
        tree_diff.compare_oids(old_oid, new_oid, "")?;
        tree_diff.finish();
        Ok(tree_diff)
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<RawObject> {
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            let object = self.read_object(object_path)?;

            // loose objects are named after their content
            let actual = object.object_id()?;
            if &actual != object_id {
                anyhow::bail!(
                    "Corrupt object {}: content hashes to {}",
                    object_id,
                    actual
                );
            }

            return Ok(object);
        }

        self.load_packed(object_id)?
            .with_context(|| format!("Object {} not found", object_id))
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let object = self.load(object_id)?;

        match object.object_type {
            ObjectType::Commit => Ok(Some(object.unpack()?)),
            _ => Ok(None),
        }
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<RawObject> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        let object_content = Self::decompress(object_content.into())?;
        let mut object_reader = Cursor::new(object_content.clone());
        let (object_type, size) = ObjectType::parse_object_header(&mut object_reader)
            .context(format!("Invalid object header in {}", object_path.display()))?;

        let body = object_content.slice(object_reader.position() as usize..);
        if body.len() != size {
            anyhow::bail!(
                "Object size mismatch in {}: header says {}, found {}",
                object_path.display(),
                size,
                body.len()
            );
        }

        Ok(RawObject::new(object_type, body))
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn packs(&self) -> anyhow::Result<&[Pack]> {
        if let Some(packs) = self.packs.get() {
            return Ok(packs);
        }

        let packs = self.open_packs()?;
        Ok(self.packs.get_or_init(|| packs))
    }

    fn open_packs(&self) -> anyhow::Result<Vec<Pack>> {
        let pack_dir = self.path.join("pack");
        if !pack_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut index_paths = std::fs::read_dir(&pack_dir)
            .with_context(|| format!("Unable to list pack directory {}", pack_dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "idx"))
            .collect::<Vec<_>>();
        index_paths.sort();

        index_paths
            .iter()
            .map(|index_path| {
                let pack = Pack::open(index_path)?;
                log::debug!("opened pack {}", pack.path().display());
                Ok(pack)
            })
            .collect()
    }

    fn load_packed(&self, object_id: &ObjectId) -> anyhow::Result<Option<RawObject>> {
        for pack in self.packs()? {
            if let Some(offset) = pack.offset_of(object_id)? {
                return self.resolve_packed(pack, offset).map(Some);
            }
        }

        Ok(None)
    }

    /// Walk a delta chain down to its base object, then replay the deltas
    fn resolve_packed(&self, pack: &Pack, offset: u64) -> anyhow::Result<RawObject> {
        let mut deltas = Vec::new();
        let mut offset = offset;

        let base = loop {
            if deltas.len() > MAX_DELTA_CHAIN {
                anyhow::bail!("delta chain too long in {}", pack.path().display());
            }

            match pack.read_entry(offset)? {
                PackEntry::Base(object) => break object,
                PackEntry::OfsDelta { base_offset, delta } => {
                    deltas.push(delta);
                    offset = base_offset;
                }
                PackEntry::RefDelta { base_oid, delta } => {
                    deltas.push(delta);
                    match pack.offset_of(&base_oid)? {
                        Some(base_offset) => offset = base_offset,
                        None => break self.load(&base_oid)?,
                    }
                }
            }
        };

        deltas.iter().rev().try_fold(base, |object, delta| -> anyhow::Result<_> {
            Ok(RawObject::new(
                object.object_type,
                apply_delta(&object.data, delta)?,
            ))
        })
    }
}
