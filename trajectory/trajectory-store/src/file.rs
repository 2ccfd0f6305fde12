//! On-disk encoding of a store tree.
//!
//! # Layout
//!
//! ```text
//! UINT8[8]  – Magic ("TRAJSTOR")
//! UINT16    – Format version (little-endian)
//! ...       – bincode-encoded node tree
//! ```
//!
//! Dataset payloads are bincode-encoded arrays, optionally compressed with
//! zstd before they enter the tree. The tree itself is written in one pass;
//! entries cannot be rewritten inside an existing file, which is why the
//! mutation API is remove-then-create over an in-memory tree.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::array::ArrayData;
use crate::error::{StoreError, StoreResult};
use crate::group::{Compression, Dataset, Group, Node};

/// Magic bytes identifying a trajectory store file.
const MAGIC: [u8; 8] = *b"TRAJSTOR";

/// Current format version.
const VERSION: u16 = 1;

/// zstd level for compressed dataset payloads.
const COMPRESSION_LEVEL: i32 = 3;

#[derive(Serialize, Deserialize)]
struct StoredGroup {
    children: BTreeMap<String, StoredNode>,
}

#[derive(Serialize, Deserialize)]
enum StoredNode {
    Group(StoredGroup),
    Dataset(StoredDataset),
}

#[derive(Serialize, Deserialize)]
struct StoredDataset {
    compression: Compression,
    payload: Vec<u8>,
}

/// Writes a store tree to `writer`.
pub(crate) fn write_store<W: Write>(writer: &mut W, root: &Group) -> StoreResult<()> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    let stored = encode_group(root)?;
    bincode::serialize_into(writer, &stored).map_err(|e| StoreError::Encode(e.to_string()))
}

/// Reads a store tree from `reader`.
pub(crate) fn read_store<R: Read>(reader: &mut R) -> StoreResult<Group> {
    let mut magic = [0u8; 8];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(StoreError::BadMagic);
    }

    let mut version = [0u8; 2];
    reader.read_exact(&mut version)?;
    let version = u16::from_le_bytes(version);
    if version != VERSION {
        return Err(StoreError::UnsupportedVersion {
            got: version,
            supported: VERSION,
        });
    }

    let stored: StoredGroup =
        bincode::deserialize_from(reader).map_err(|e| StoreError::Decode(e.to_string()))?;
    decode_group(stored)
}

fn encode_group(group: &Group) -> StoreResult<StoredGroup> {
    let mut children = BTreeMap::new();
    for (name, node) in group.iter() {
        let stored = match node {
            Node::Group(g) => StoredNode::Group(encode_group(g)?),
            Node::Dataset(ds) => StoredNode::Dataset(encode_dataset(ds)?),
        };
        children.insert(name.to_string(), stored);
    }
    Ok(StoredGroup { children })
}

fn encode_dataset(dataset: &Dataset) -> StoreResult<StoredDataset> {
    let raw = bincode::serialize(&dataset.data).map_err(|e| StoreError::Encode(e.to_string()))?;
    let payload = match dataset.compression {
        Compression::None => raw,
        Compression::Zstd => zstd::encode_all(&raw[..], COMPRESSION_LEVEL)?,
    };
    Ok(StoredDataset {
        compression: dataset.compression,
        payload,
    })
}

fn decode_group(stored: StoredGroup) -> StoreResult<Group> {
    let mut group = Group::new();
    for (name, node) in stored.children {
        match node {
            StoredNode::Group(g) => {
                let decoded = decode_group(g)?;
                let slot = group.ensure_group(&name)?;
                *slot = decoded;
            }
            StoredNode::Dataset(ds) => {
                group.create_dataset(&name, decode_dataset(ds)?)?;
            }
        }
    }
    Ok(group)
}

fn decode_dataset(stored: StoredDataset) -> StoreResult<Dataset> {
    let raw = match stored.compression {
        Compression::None => stored.payload,
        Compression::Zstd => zstd::decode_all(&stored.payload[..])?,
    };
    let data: ArrayData =
        bincode::deserialize(&raw).map_err(|e| StoreError::Decode(e.to_string()))?;
    Ok(Dataset {
        data,
        compression: stored.compression,
    })
}
