//! Bundle directory: block list and file nodes

use crate::compression::CompressionBlock;
use crate::error::{BinaryError, Result};
use crate::reader::{BinaryReader, ByteOrder};
use serde::{Deserialize, Serialize};

/// Size of the uncompressed-data hash that opens the directory
const DIRECTORY_HASH_SIZE: usize = 16;

/// One logical file inside the assets stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    /// Offset of the node in the assets stream (high word on disk)
    pub offset: i32,
    /// Low word of the offset
    pub alt_offset: i32,
    /// Size of the node (high word on disk)
    pub size: i32,
    /// Low word of the size
    pub alt_size: i32,
    /// Node status flags
    pub status: i32,
    /// Node name
    pub name: String,
}

impl DirectoryNode {
    fn from_reader(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            offset: reader.read_i32()?,
            alt_offset: reader.read_i32()?,
            size: reader.read_i32()?,
            alt_size: reader.read_i32()?,
            status: reader.read_i32()?,
            name: reader.read_cstring()?,
        })
    }
}

/// Parsed bundle directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub blocks: Vec<CompressionBlock>,
    pub nodes: Vec<DirectoryNode>,
}

impl Directory {
    /// Parse a decompressed directory buffer
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data, ByteOrder::Big);
        reader.skip(DIRECTORY_HASH_SIZE)?;

        let block_count = read_count(&mut reader, "block")?;
        let mut blocks = Vec::with_capacity(block_count.min(reader.remaining() / 10));
        for _ in 0..block_count {
            let uncompressed_size = reader.read_u32()?;
            let compressed_size = reader.read_u32()?;
            let flags = reader.read_u16()?;
            blocks.push(CompressionBlock::new(uncompressed_size, compressed_size, flags));
        }

        let node_count = read_count(&mut reader, "node")?;
        let mut nodes = Vec::with_capacity(node_count.min(reader.remaining() / 21));
        for _ in 0..node_count {
            nodes.push(DirectoryNode::from_reader(&mut reader)?);
        }

        Ok(Self { blocks, nodes })
    }

    /// Check if any data block needs decompression
    pub fn has_compressed_blocks(&self) -> bool {
        self.blocks.iter().any(|block| !block.is_stored())
    }
}

fn read_count(reader: &mut BinaryReader, what: &str) -> Result<usize> {
    let count = reader.read_i32()?;
    usize::try_from(count)
        .map_err(|_| BinaryError::corrupt(format!("Negative {} count: {}", what, count)))
}
