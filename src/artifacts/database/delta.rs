//! Git delta decoding
//!
//! Deltified pack entries store a target object as a list of instructions
//! against a base object:
//!
//! ```text
//! <base size varint> <target size varint> <instruction>*
//! ```
//!
//! - `1xxxxxxx`: copy from the base. The low 4 bits select which offset bytes
//!   follow, the next 3 bits which size bytes follow (little endian). A size
//!   of zero means `0x10000`.
//! - `0xxxxxxx`: insert the next `x` bytes literally (`x` must be non-zero).

use anyhow::Context;
use bytes::Bytes;

const COPY_FLAG: u8 = 0x80;
const DEFAULT_COPY_SIZE: usize = 0x10000;

pub fn apply_delta(base: &[u8], delta: &[u8]) -> anyhow::Result<Bytes> {
    let mut cursor = 0;

    let base_size = read_size(delta, &mut cursor)?;
    if base_size != base.len() {
        anyhow::bail!(
            "delta base size mismatch: expected {}, found {}",
            base_size,
            base.len()
        );
    }
    let target_size = read_size(delta, &mut cursor)?;
    let mut target = Vec::with_capacity(target_size);

    while cursor < delta.len() {
        let opcode = delta[cursor];
        cursor += 1;

        if opcode & COPY_FLAG != 0 {
            let offset = read_sparse(delta, &mut cursor, opcode & 0x0f)?;
            let size = match read_sparse(delta, &mut cursor, (opcode >> 4) & 0x07)? {
                0 => DEFAULT_COPY_SIZE,
                size => size,
            };

            let end = offset
                .checked_add(size)
                .context("delta copy instruction overflows")?;
            let chunk = base
                .get(offset..end)
                .context("delta copy instruction out of base bounds")?;
            target.extend_from_slice(chunk);
        } else if opcode != 0 {
            let size = opcode as usize;
            let chunk = delta
                .get(cursor..cursor + size)
                .context("delta insert instruction out of bounds")?;
            target.extend_from_slice(chunk);
            cursor += size;
        } else {
            anyhow::bail!("reserved delta opcode 0");
        }
    }

    if target.len() != target_size {
        anyhow::bail!(
            "delta target size mismatch: expected {}, found {}",
            target_size,
            target.len()
        );
    }

    Ok(target.into())
}

/// Little-endian base-128 size used in delta headers
fn read_size(data: &[u8], cursor: &mut usize) -> anyhow::Result<usize> {
    let mut size = 0usize;
    let mut shift = 0;

    loop {
        let byte = *data.get(*cursor).context("truncated delta size")?;
        *cursor += 1;

        if shift >= usize::BITS {
            anyhow::bail!("delta size varint too long");
        }
        size |= ((byte & 0x7f) as usize) << shift;
        shift += 7;

        if byte & 0x80 == 0 {
            return Ok(size);
        }
    }
}

/// Read the bytes selected by `present`, one bit per little-endian byte
fn read_sparse(data: &[u8], cursor: &mut usize, present: u8) -> anyhow::Result<usize> {
    let mut value = 0usize;

    for i in 0..8 {
        if present & (1 << i) != 0 {
            let byte = *data.get(*cursor).context("truncated delta copy instruction")?;
            *cursor += 1;
            value |= (byte as usize) << (8 * i);
        }
    }

    Ok(value)
}
