//! SerializedFile header parsing

use crate::error::{BinaryError, Result};
use crate::reader::{BinaryReader, ByteOrder};
use serde::{Deserialize, Serialize};

/// Oldest format version whose endianness flag sits right after the header
pub const MIN_INLINE_ENDIAN_FORMAT: u32 = 10;

/// Header of the serialized file in the assets stream
///
/// Read big-endian; everything after it is little-endian.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedFileHeader {
    /// Size of the metadata section
    pub metadata_size: u32,
    /// Total file size
    pub file_size: u32,
    /// File format version
    pub format: u32,
    /// Offset of object data, relative to the start of the stream
    pub data_offset: u32,
    /// Endianness flag (only 0, little-endian, is accepted)
    pub endian: u8,
    /// Reserved bytes
    pub reserved: [u8; 3],
}

impl SerializedFileHeader {
    /// Parse the header from a big-endian reader
    pub fn from_reader(reader: &mut BinaryReader) -> Result<Self> {
        let metadata_size = reader.read_u32()?;
        let file_size = reader.read_u32()?;
        let format = reader.read_u32()?;
        let data_offset = reader.read_u32()?;

        if format < MIN_INLINE_ENDIAN_FORMAT {
            return Err(BinaryError::unsupported(format!(
                "serialized file format {} keeps its endianness flag after the metadata",
                format
            )));
        }

        let endian = reader.read_u8()?;
        if endian != 0 {
            return Err(BinaryError::format(format!(
                "Only little-endian serialized files are supported, endianness flag is {}",
                endian
            )));
        }
        let mut reserved = [0u8; 3];
        reserved.copy_from_slice(reader.read_slice(3)?);

        Ok(Self {
            metadata_size,
            file_size,
            format,
            data_offset,
            endian,
            reserved,
        })
    }

    /// Get the byte order of the metadata and object data
    pub fn byte_order(&self) -> ByteOrder {
        if self.endian == 0 {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }
}
