//! Git pack files
//!
//! Cloned and garbage-collected repositories keep most objects in
//! `.git/objects/pack/pack-<sha>.pack`, with a sibling `.idx` file mapping
//! object IDs to offsets inside the pack.
//!
//! ## Index format (version 2)
//!
//! ```text
//! \377tOc | version (4 bytes) | fanout (256 * 4 bytes)
//! object names (N * 20 bytes, sorted)
//! crc32 (N * 4 bytes)
//! offsets (N * 4 bytes, MSB set = index into the large offset table)
//! large offsets (M * 8 bytes)
//! ```
//!
//! ## Pack entry format
//!
//! A variable-length header carries the 3-bit type and the inflated size,
//! followed (for deltas) by the base reference, then the zlib stream.

use crate::artifacts::objects::object::RawObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use anyhow::Context;
use byteorder::{NetworkEndian, ReadBytesExt};
use bytes::Bytes;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

const INDEX_MAGIC: [u8; 4] = [0xff, b't', b'O', b'c'];
const INDEX_VERSION: u32 = 2;
const FANOUT_SIZE: usize = 256;
const LARGE_OFFSET_FLAG: u32 = 0x8000_0000;

const PACK_SIGNATURE: &[u8; 4] = b"PACK";
const PACK_HEADER_SIZE: usize = 12;

const OFS_DELTA: u8 = 6;
const REF_DELTA: u8 = 7;

/// A single decoded pack entry, before delta resolution
#[derive(Debug, Clone)]
pub enum PackEntry {
    Base(RawObject),
    OfsDelta { base_offset: u64, delta: Bytes },
    RefDelta { base_oid: ObjectId, delta: Bytes },
}

#[derive(Debug)]
pub struct PackIndex {
    fanout: [u32; FANOUT_SIZE],
    names: Vec<[u8; RAW_OBJECT_ID_LENGTH]>,
    offsets: Vec<u64>,
}

impl PackIndex {
    pub fn parse(data: &[u8]) -> anyhow::Result<Self> {
        let mut reader = Cursor::new(data);

        let mut magic = [0; 4];
        reader.read_exact(&mut magic)?;
        if magic != INDEX_MAGIC {
            anyhow::bail!("unsupported pack index format (version 1 or corrupt)");
        }
        let version = reader.read_u32::<NetworkEndian>()?;
        if version != INDEX_VERSION {
            anyhow::bail!("unsupported pack index version {version}");
        }

        let mut fanout = [0; FANOUT_SIZE];
        for slot in fanout.iter_mut() {
            *slot = reader.read_u32::<NetworkEndian>()?;
        }
        let count = fanout[FANOUT_SIZE - 1] as usize;

        let mut names = Vec::with_capacity(count);
        for _ in 0..count {
            let mut name = [0; RAW_OBJECT_ID_LENGTH];
            reader.read_exact(&mut name)?;
            names.push(name);
        }

        // crc32 values are not needed for reading
        reader.set_position(reader.position() + 4 * count as u64);

        let small_offsets = (0..count)
            .map(|_| reader.read_u32::<NetworkEndian>())
            .collect::<Result<Vec<_>, _>>()
            .context("truncated pack index offsets")?;

        let large_offsets_start = reader.position();
        let offsets = small_offsets
            .into_iter()
            .map(|offset| {
                if offset & LARGE_OFFSET_FLAG == 0 {
                    return Ok(offset as u64);
                }

                let position = (offset & !LARGE_OFFSET_FLAG) as u64;
                reader.set_position(large_offsets_start + 8 * position);
                reader
                    .read_u64::<NetworkEndian>()
                    .context("truncated pack index large offsets")
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(PackIndex {
            fanout,
            names,
            offsets,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn offset_of(&self, oid: &ObjectId) -> anyhow::Result<Option<u64>> {
        let raw = oid.to_raw()?;
        let first = raw[0] as usize;

        let start = if first == 0 {
            0
        } else {
            self.fanout[first - 1] as usize
        };
        let end = self.fanout[first] as usize;

        Ok(self
            .names
            .get(start..end)
            .and_then(|bucket| bucket.binary_search(&raw).ok())
            .map(|position| self.offsets[start + position]))
    }
}

#[derive(Debug)]
pub struct Pack {
    path: PathBuf,
    data: Bytes,
    index: PackIndex,
}

impl Pack {
    /// Open a pack through its `.idx` file; the `.pack` file sits next to it
    pub fn open(index_path: &Path) -> anyhow::Result<Self> {
        let index_data = std::fs::read(index_path)
            .with_context(|| format!("Unable to read pack index {}", index_path.display()))?;
        let index = PackIndex::parse(&index_data)
            .with_context(|| format!("Invalid pack index {}", index_path.display()))?;

        let path = index_path.with_extension("pack");
        let data = std::fs::read(&path)
            .with_context(|| format!("Unable to read pack file {}", path.display()))?;

        Self::from_parts(path, data.into(), index)
    }

    pub fn from_parts(path: PathBuf, data: Bytes, index: PackIndex) -> anyhow::Result<Self> {
        if data.len() < PACK_HEADER_SIZE || &data[..4] != PACK_SIGNATURE {
            anyhow::bail!("Invalid pack file {}", path.display());
        }

        let mut header = Cursor::new(&data[4..PACK_HEADER_SIZE]);
        let version = header.read_u32::<NetworkEndian>()?;
        if version != 2 && version != 3 {
            anyhow::bail!("unsupported pack version {} in {}", version, path.display());
        }

        Ok(Pack { path, data, index })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn offset_of(&self, oid: &ObjectId) -> anyhow::Result<Option<u64>> {
        self.index.offset_of(oid)
    }

    pub fn read_entry(&self, offset: u64) -> anyhow::Result<PackEntry> {
        let mut cursor = offset as usize;

        let mut byte = self.byte_at(cursor)?;
        cursor += 1;
        let type_code = (byte >> 4) & 0x07;
        let mut size = (byte & 0x0f) as usize;
        let mut shift = 4;

        while byte & 0x80 != 0 {
            if shift >= usize::BITS {
                anyhow::bail!("pack entry size too long in {}", self.path.display());
            }
            byte = self.byte_at(cursor)?;
            cursor += 1;
            size |= ((byte & 0x7f) as usize) << shift;
            shift += 7;
        }

        match type_code {
            OFS_DELTA => {
                let distance = self.read_offset_distance(&mut cursor)?;
                let base_offset = offset
                    .checked_sub(distance)
                    .context("delta base offset before start of pack")?;

                Ok(PackEntry::OfsDelta {
                    base_offset,
                    delta: self.inflate(cursor, size)?,
                })
            }
            REF_DELTA => {
                let raw = self
                    .data
                    .get(cursor..cursor + RAW_OBJECT_ID_LENGTH)
                    .context("truncated delta base id")?;
                let base_oid = ObjectId::from_raw(raw)?;
                cursor += RAW_OBJECT_ID_LENGTH;

                Ok(PackEntry::RefDelta {
                    base_oid,
                    delta: self.inflate(cursor, size)?,
                })
            }
            code => {
                let object_type = ObjectType::from_pack_code(code).with_context(|| {
                    format!("invalid object type {} in {}", code, self.path.display())
                })?;

                Ok(PackEntry::Base(RawObject::new(
                    object_type,
                    self.inflate(cursor, size)?,
                )))
            }
        }
    }

    /// Offset encoding of `OFS_DELTA`: big-endian base-128 with an implicit
    /// `+1` on every continuation byte
    fn read_offset_distance(&self, cursor: &mut usize) -> anyhow::Result<u64> {
        let mut byte = self.byte_at(*cursor)?;
        *cursor += 1;
        let mut distance = (byte & 0x7f) as u64;

        while byte & 0x80 != 0 {
            byte = self.byte_at(*cursor)?;
            *cursor += 1;
            distance = distance
                .checked_add(1)
                .filter(|next| next.leading_zeros() >= 7)
                .map(|next| (next << 7) | (byte & 0x7f) as u64)
                .with_context(|| format!("delta base offset overflows in {}", self.path.display()))?;
        }

        Ok(distance)
    }

    fn inflate(&self, start: usize, size: usize) -> anyhow::Result<Bytes> {
        let compressed = self
            .data
            .get(start..)
            .context("pack entry data out of bounds")?;

        let mut decoder = flate2::read::ZlibDecoder::new(compressed);
        let mut inflated = Vec::with_capacity(size);
        decoder
            .read_to_end(&mut inflated)
            .with_context(|| format!("Unable to inflate pack entry in {}", self.path.display()))?;

        if inflated.len() != size {
            anyhow::bail!(
                "pack entry size mismatch: expected {}, found {}",
                size,
                inflated.len()
            );
        }

        Ok(inflated.into())
    }

    fn byte_at(&self, position: usize) -> anyhow::Result<u8> {
        self.data
            .get(position)
            .copied()
            .with_context(|| format!("truncated pack file {}", self.path.display()))
    }
}
