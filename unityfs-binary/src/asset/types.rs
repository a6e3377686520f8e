//! Serialized file metadata structures

use super::header::SerializedFileHeader;
use crate::error::Result;
use crate::reader::BinaryReader;
use crate::typetree::RawTypeTree;
use serde::{Deserialize, Serialize};

/// Padding in front of every object record
pub const OBJECT_RECORD_PADDING: usize = 3;

/// One entry of the object directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDirectoryEntry {
    /// Low word of the path id
    pub path_id_low: i32,
    /// High word of the path id
    pub path_id_high: i32,
    /// Offset of the object's bytes, relative to the header's data offset
    pub data_offset: u32,
    /// Size of the object's bytes
    pub size: u32,
    /// Type id, matched against type tree class ids first
    pub type_id: i32,
    /// Class id, the fallback match
    pub class_id: i16,
    pub unknown1: i16,
    pub unknown2: i8,
}

impl ObjectDirectoryEntry {
    /// Read one record, including its leading padding
    pub fn from_reader(reader: &mut BinaryReader) -> Result<Self> {
        reader.skip(OBJECT_RECORD_PADDING)?;
        Ok(Self {
            path_id_low: reader.read_i32()?,
            path_id_high: reader.read_i32()?,
            data_offset: reader.read_u32()?,
            size: reader.read_u32()?,
            type_id: reader.read_i32()?,
            class_id: reader.read_i16()?,
            unknown1: reader.read_i16()?,
            unknown2: reader.read_i8()?,
        })
    }

    /// Full 64-bit path id
    pub fn path_id(&self) -> i64 {
        ((self.path_id_high as i64) << 32) | (self.path_id_low as u32 as i64)
    }
}

/// Everything read from the serialized file ahead of the object data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub header: SerializedFileHeader,
    /// Engine version string
    pub generator_version: String,
    pub target_platform: u32,
    pub has_type_trees: bool,
    /// Embedded type tree blocks
    pub types: Vec<RawTypeTree>,
    /// Object directory in file order
    pub objects: Vec<ObjectDirectoryEntry>,
    /// Trailing string closing the metadata
    pub trailing: String,
}
