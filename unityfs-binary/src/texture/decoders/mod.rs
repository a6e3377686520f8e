//! Texture decoders module

mod compressed;

pub use compressed::CompressedDecoder;

use super::formats::TextureFormat;
use super::types::Texture2D;
use crate::error::{BinaryError, Result};
use image::RgbaImage;

/// Largest accepted texture edge
pub const MAX_DIMENSION: u32 = 16384;

/// Main texture decoder dispatcher
pub struct TextureDecoder {
    compressed: CompressedDecoder,
}

impl TextureDecoder {
    /// Create a new texture decoder
    pub fn new() -> Self {
        Self {
            compressed: CompressedDecoder::new(),
        }
    }

    /// Decode texture to RGBA image
    pub fn decode(&self, texture: &Texture2D) -> Result<RgbaImage> {
        if self.compressed.can_decode(texture.format) {
            self.compressed.decode(texture)
        } else {
            Err(BinaryError::unsupported(format!(
                "texture format {}",
                texture.format.name()
            )))
        }
    }

    /// Check if a format can be decoded
    pub fn can_decode(&self, format: TextureFormat) -> bool {
        self.compressed.can_decode(format)
    }
}

impl Default for TextureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Common decoder trait
pub trait Decoder {
    /// Decode texture data to RGBA image
    fn decode(&self, texture: &Texture2D) -> Result<RgbaImage>;

    /// Check if this decoder can handle the given format
    fn can_decode(&self, format: TextureFormat) -> bool;
}

/// Wrap a top-down RGBA8 buffer in an image
pub(crate) fn create_rgba_image(data: Vec<u8>, width: u32, height: u32) -> Result<RgbaImage> {
    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        return Err(BinaryError::corrupt(format!(
            "RGBA buffer is {} bytes, expected {}",
            data.len(),
            expected
        )));
    }
    RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| BinaryError::corrupt("Failed to create RGBA image from raw data"))
}

/// Reject empty or oversized textures
pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(BinaryError::corrupt(format!(
            "Invalid texture dimensions {}x{}",
            width, height
        )));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(BinaryError::corrupt(format!(
            "Texture dimensions {}x{} exceed {}",
            width, height, MAX_DIMENSION
        )));
    }
    Ok(())
}
