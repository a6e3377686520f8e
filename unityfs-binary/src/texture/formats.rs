//! Texture format definitions
//!
//! Values match Unity's internal TextureFormat enum. Only the two
//! block-compressed formats below can be decoded.

use crate::error::{BinaryError, Result};
use serde::{Deserialize, Serialize};

/// Decodable texture formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum TextureFormat {
    /// BC1: opaque or 1-bit alpha, 8 bytes per 4x4 block
    DXT1 = 10,
    /// BC3: interpolated alpha, 16 bytes per 4x4 block
    DXT5 = 12,
}

impl TextureFormat {
    /// Map a format code, rejecting anything that cannot be decoded
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            10 => Ok(TextureFormat::DXT1),
            12 => Ok(TextureFormat::DXT5),
            other => Err(BinaryError::unsupported(format!(
                "texture format {} (only DXT1 and DXT5 are decoded)",
                other
            ))),
        }
    }

    /// Format code as stored in `m_TextureFormat`
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Bytes per 4x4 block
    pub fn block_size(self) -> usize {
        match self {
            TextureFormat::DXT1 => 8,
            TextureFormat::DXT5 => 16,
        }
    }

    /// Bytes needed for the top mip level of a `width` x `height` image
    pub fn data_size(self, width: u32, height: u32) -> usize {
        let blocks_x = width.div_ceil(4) as usize;
        let blocks_y = height.div_ceil(4) as usize;
        blocks_x * blocks_y * self.block_size()
    }

    pub fn name(self) -> &'static str {
        match self {
            TextureFormat::DXT1 => "DXT1",
            TextureFormat::DXT5 => "DXT5",
        }
    }
}
