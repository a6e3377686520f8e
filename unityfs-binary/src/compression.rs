//! Compression support for UnityFS bundles
//!
//! The block codec itself sits behind the [`Decompressor`] trait; the default
//! implementation is LZ4 block decompression from `lz4_flex`.

use crate::error::{BinaryError, Result};
use serde::{Deserialize, Serialize};

/// Codec selected by the low six bits of the envelope or block flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionType {
    /// Stored as-is
    None = 0,
    Lzma = 1,
    Lz4 = 2,
    /// Same block format as `Lz4`
    Lz4Hc = 3,
    Lzham = 4,
}

impl CompressionType {
    /// Bits of a flags word that carry the codec
    pub const MASK: u32 = 0x3F;

    /// Read the codec out of a flags word
    pub fn from_flags(flags: u32) -> Result<Self> {
        let kind = match flags & Self::MASK {
            0 => CompressionType::None,
            1 => CompressionType::Lzma,
            2 => CompressionType::Lz4,
            3 => CompressionType::Lz4Hc,
            4 => CompressionType::Lzham,
            other => {
                return Err(BinaryError::unsupported(format!(
                    "compression codec {} in flags {:#x}",
                    other, flags
                )));
            }
        };
        Ok(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressionType::None => "stored",
            CompressionType::Lzma => "LZMA",
            CompressionType::Lz4 => "LZ4",
            CompressionType::Lz4Hc => "LZ4HC",
            CompressionType::Lzham => "LZHAM",
        }
    }
}

/// Block decompressor seam
///
/// Implementations must fail on malformed input rather than return a
/// partially filled buffer.
pub trait Decompressor {
    /// Decompress `src` into exactly `uncompressed_size` bytes
    fn decompress(&self, src: &[u8], uncompressed_size: usize) -> Result<Vec<u8>>;
}

/// LZ4 block-format decompressor (bundles never use the frame format)
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Decompressor;

impl Decompressor for Lz4Decompressor {
    fn decompress(&self, src: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
        let output = lz4_flex::block::decompress(src, uncompressed_size)?;
        if output.len() != uncompressed_size {
            return Err(BinaryError::decompression(format!(
                "LZ4 size mismatch: expected {}, got {}",
                uncompressed_size,
                output.len()
            )));
        }
        Ok(output)
    }
}

/// Expand `data` to `uncompressed_size` bytes with the given codec
pub fn decompress(
    data: &[u8],
    compression: CompressionType,
    uncompressed_size: usize,
    decompressor: &dyn Decompressor,
) -> Result<Vec<u8>> {
    match compression {
        CompressionType::None => {
            if data.len() != uncompressed_size {
                return Err(BinaryError::corrupt(format!(
                    "Stored block size mismatch: {} bytes, header says {}",
                    data.len(),
                    uncompressed_size
                )));
            }
            Ok(data.to_vec())
        }
        CompressionType::Lz4 | CompressionType::Lz4Hc => {
            decompressor.decompress(data, uncompressed_size)
        }
        CompressionType::Lzma | CompressionType::Lzham => Err(BinaryError::unsupported(
            format!("{} compression", compression.name()),
        )),
    }
}

/// One entry of the bundle's block list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionBlock {
    /// Uncompressed size of the block
    pub uncompressed_size: u32,
    /// Compressed size of the block
    pub compressed_size: u32,
    /// Compression flags
    pub flags: u16,
}

impl CompressionBlock {
    /// Create a new compression block
    pub fn new(uncompressed_size: u32, compressed_size: u32, flags: u16) -> Self {
        Self {
            uncompressed_size,
            compressed_size,
            flags,
        }
    }

    /// Get the compression type for this block
    pub fn compression_type(&self) -> Result<CompressionType> {
        CompressionType::from_flags(self.flags as u32)
    }

    /// Check if this block is stored without compression
    pub fn is_stored(&self) -> bool {
        (self.flags as u32) & CompressionType::MASK == 0
    }

    /// Decompress the block data
    pub fn decompress(&self, data: &[u8], decompressor: &dyn Decompressor) -> Result<Vec<u8>> {
        if data.len() != self.compressed_size as usize {
            return Err(BinaryError::truncated(self.compressed_size as usize, data.len()));
        }
        decompress(
            data,
            self.compression_type()?,
            self.uncompressed_size as usize,
            decompressor,
        )
    }
}
