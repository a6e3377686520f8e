//! Raw type tree block parsing
//!
//! A block is a class id, a flat list of fixed-width node descriptors and
//! the string buffer their name offsets point into.

use crate::error::{BinaryError, Result};
use crate::reader::BinaryReader;
use serde::{Deserialize, Serialize};

/// On-disk size of one node descriptor
pub const RAW_NODE_SIZE: usize = 24;

/// Flat node descriptor as stored in the serialized file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTypeTreeNode {
    pub version: i16,
    pub depth: u8,
    pub is_array: bool,
    pub type_offset: i32,
    pub name_offset: i32,
    pub byte_size: i32,
    pub index: u32,
    pub flags: i32,
}

impl RawTypeTreeNode {
    /// Read one descriptor (little-endian)
    pub fn from_reader(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            version: reader.read_i16()?,
            depth: reader.read_u8()?,
            is_array: reader.read_bool()?,
            type_offset: reader.read_i32()?,
            name_offset: reader.read_i32()?,
            byte_size: reader.read_i32()?,
            index: reader.read_u32()?,
            flags: reader.read_i32()?,
        })
    }
}

/// One embedded type tree block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTypeTree {
    /// Class id the tree describes (negative for script types)
    pub class_id: i32,
    /// Nodes in pre-order
    pub nodes: Vec<RawTypeTreeNode>,
    /// Local string buffer
    pub string_buffer: Vec<u8>,
}

impl RawTypeTree {
    /// Parse a block from a little-endian reader
    pub fn from_reader(reader: &mut BinaryReader) -> Result<Self> {
        let class_id = reader.read_i32()?;
        // Script types carry a script hash in front of the type hash
        reader.skip(if class_id < 0 { 0x20 } else { 0x10 })?;

        let node_count = reader.read_u32()? as usize;
        let buffer_size = reader.read_u32()? as usize;

        let needed = node_count.saturating_mul(RAW_NODE_SIZE);
        if needed > reader.remaining() {
            return Err(BinaryError::truncated(needed, reader.remaining()));
        }

        let mut nodes = Vec::with_capacity(node_count);
        for _ in 0..node_count {
            nodes.push(RawTypeTreeNode::from_reader(reader)?);
        }
        let string_buffer = reader.read_bytes(buffer_size)?;

        Ok(Self {
            class_id,
            nodes,
            string_buffer,
        })
    }
}
