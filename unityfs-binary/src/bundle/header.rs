//! UnityFS envelope header parsing

use crate::compression::CompressionType;
use crate::error::{BinaryError, Result};
use crate::reader::BinaryReader;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Signature every UnityFS container starts with
pub const UNITY_FS_SIGNATURE: &str = "UnityFS";

/// Envelope format versions seen in the wild
pub const KNOWN_FORMAT_VERSIONS: [i32; 3] = [6, 7, 8];

/// UnityFS envelope header
///
/// All fields are big-endian on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleHeader {
    /// Always "UnityFS"
    pub signature: String,
    /// Envelope format version
    pub format_version: i32,
    /// Unity version that created this bundle
    pub unity_version: String,
    /// Generator (engine revision) string
    pub generator_version: String,
    /// First copy of the file size
    pub file_size1: i32,
    /// Second copy of the file size
    pub file_size2: i32,
    /// Size of the compressed directory blob
    pub compressed_blocks_info_size: u32,
    /// Size of the directory once decompressed
    pub uncompressed_blocks_info_size: u32,
    /// Archive flags (compression type in the low bits)
    pub flags: u32,
}

impl BundleHeader {
    /// Parse the envelope header from a big-endian reader
    pub fn from_reader(reader: &mut BinaryReader) -> Result<Self> {
        let signature = reader.read_cstring()?;
        if signature != UNITY_FS_SIGNATURE {
            return Err(BinaryError::format(format!(
                "Expected signature {}, got {:?}",
                UNITY_FS_SIGNATURE, signature
            )));
        }

        let header = Self {
            signature,
            format_version: reader.read_i32()?,
            unity_version: reader.read_cstring()?,
            generator_version: reader.read_cstring()?,
            file_size1: reader.read_i32()?,
            file_size2: reader.read_i32()?,
            compressed_blocks_info_size: reader.read_u32()?,
            uncompressed_blocks_info_size: reader.read_u32()?,
            flags: reader.read_u32()?,
        };

        debug!(
            unity_version = %header.unity_version,
            generator_version = %header.generator_version,
            format_version = header.format_version,
            "Parsed UnityFS header"
        );
        if !KNOWN_FORMAT_VERSIONS.contains(&header.format_version) {
            warn!(
                "Unexpected UnityFS format version {}, continuing",
                header.format_version
            );
        }

        Ok(header)
    }

    /// Get the directory compression type from flags
    pub fn compression_type(&self) -> Result<CompressionType> {
        CompressionType::from_flags(self.flags)
    }
}
