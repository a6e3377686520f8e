//! Block-compressed texture decoders (DXT1 / DXT5)
//!
//! Block math is done by `texture2ddecoder`. Each 4x4 block decodes to 16
//! pixels; pixels of edge blocks that fall outside the image are dropped.

use super::{Decoder, create_rgba_image, validate_dimensions};
use crate::error::{BinaryError, Result};
use crate::texture::formats::TextureFormat;
use crate::texture::types::Texture2D;
use image::RgbaImage;

/// Decoder for DXT1 and DXT5 payloads
pub struct CompressedDecoder;

impl CompressedDecoder {
    /// Create a new compressed decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a raw payload of the given format
    pub fn decode_raw(
        &self,
        format: TextureFormat,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        validate_dimensions(width, height)?;

        let needed = format.data_size(width, height);
        if data.len() < needed {
            return Err(BinaryError::corrupt(format!(
                "{} payload is {} bytes, {}x{} needs {}",
                format.name(),
                data.len(),
                width,
                height,
                needed
            )));
        }

        let mut pixels = vec![0u32; width as usize * height as usize];
        let payload = &data[..needed];
        let decoded = match format {
            TextureFormat::DXT1 => texture2ddecoder::decode_bc1(
                payload,
                width as usize,
                height as usize,
                &mut pixels,
            ),
            TextureFormat::DXT5 => texture2ddecoder::decode_bc3(
                payload,
                width as usize,
                height as usize,
                &mut pixels,
            ),
        };
        decoded.map_err(|e| {
            BinaryError::corrupt(format!("{} block decode failed: {}", format.name(), e))
        })?;

        create_rgba_image(unpack_bgra(&pixels), width, height)
    }
}

impl Default for CompressedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for CompressedDecoder {
    fn decode(&self, texture: &Texture2D) -> Result<RgbaImage> {
        self.decode_raw(
            texture.format,
            &texture.image_data,
            texture.width,
            texture.height,
        )
    }

    fn can_decode(&self, format: TextureFormat) -> bool {
        matches!(format, TextureFormat::DXT1 | TextureFormat::DXT5)
    }
}

/// Unpack decoder output (BGRA in little-endian `u32`s) into RGBA8 bytes
fn unpack_bgra(pixels: &[u32]) -> Vec<u8> {
    pixels
        .iter()
        .flat_map(|&pixel| {
            let [b, g, r, a] = pixel.to_le_bytes();
            [r, g, b, a]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(hex_str: &str) -> Vec<u8> {
        hex::decode(hex_str).unwrap()
    }

    /// Decode a single block as a 4x4 image, returned row-major
    fn decode_block(format: TextureFormat, hex_str: &str) -> Vec<[u8; 4]> {
        let image = CompressedDecoder::new()
            .decode_raw(format, &block(hex_str), 4, 4)
            .unwrap();
        image.pixels().map(|p| p.0).collect()
    }

    #[test]
    fn test_bc1_four_color_block() {
        // c0 = pure red, c1 = pure blue, indices 0,1,2,3 repeating per row
        let pixels = decode_block(TextureFormat::DXT1, "00f81f00e4e4e4e4");
        assert_eq!(pixels[0], [255, 0, 0, 255]);
        assert_eq!(pixels[1], [0, 0, 255, 255]);
        assert_eq!(pixels[2], [170, 0, 85, 255]);
        assert_eq!(pixels[3], [85, 0, 170, 255]);
        assert_eq!(pixels[4], pixels[0]);
    }

    #[test]
    fn test_bc1_three_color_block() {
        // c0 = blue < c1 = red selects the three color palette
        let pixels = decode_block(TextureFormat::DXT1, "1f0000f8e4e4e4e4");
        assert_eq!(pixels[0], [0, 0, 255, 255]);
        assert_eq!(pixels[1], [255, 0, 0, 255]);
        assert_eq!(pixels[2], [127, 0, 127, 255]);
        assert_eq!(&pixels[3][..3], &[0, 0, 0]);
    }

    #[test]
    fn test_bc3_alpha_ramp() {
        // a0 = 255, a1 = 0; first four pixels use alpha indices 0, 1, 2, 7
        let pixels = decode_block(TextureFormat::DXT5, "ff00880e00000000ffffffff00000000");
        assert_eq!(pixels[0][3], 255);
        assert_eq!(pixels[1][3], 0);
        assert_eq!(pixels[2][3], 218);
        assert_eq!(pixels[3][3], 36);
        assert_eq!(pixels[4][3], 255);
        // color endpoints are both white
        assert_eq!(&pixels[0][..3], &[255, 255, 255]);
    }

    #[test]
    fn test_bc3_six_alpha_mode() {
        // a0 = 0 <= a1 = 100; alpha indices 0, 1, 2, 6, 7
        let pixels = decode_block(TextureFormat::DXT5, "0064887c00000000ffff000000000000");
        assert_eq!(pixels[0][3], 0);
        assert_eq!(pixels[1][3], 100);
        assert_eq!(pixels[2][3], 20);
        assert_eq!(pixels[3][3], 0);
        assert_eq!(pixels[4][3], 255);
    }

    #[test]
    fn test_unpack_swaps_red_and_blue() {
        assert_eq!(unpack_bgra(&[0x80FF_0010]), [0xFF, 0x00, 0x10, 0x80]);
    }

    #[test]
    fn test_partial_blocks_are_clipped() {
        let decoder = CompressedDecoder::new();
        let mut data = block("00f81f0000000000");
        data.extend(block("1f001f0000000000"));
        let image = decoder.decode_raw(TextureFormat::DXT1, &data, 5, 3).unwrap();

        assert_eq!(image.dimensions(), (5, 3));
        assert_eq!(image.get_pixel(3, 2).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(4, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_short_payload_is_corrupt() {
        let decoder = CompressedDecoder::new();
        let err = decoder
            .decode_raw(TextureFormat::DXT5, &[0; 16], 8, 4)
            .unwrap_err();
        assert!(matches!(err, BinaryError::CorruptData(_)));
    }
}
