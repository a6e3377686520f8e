//! Sprite extraction from decoded textures

use super::types::{Sprite, SpriteImage, SpriteRect};
use crate::error::{BinaryError, Result};
use image::{RgbaImage, imageops};

/// Cut a sprite rectangle out of a top-down texture raster
///
/// `rect` is in Unity's bottom-left texture space. Destination row `r` of the
/// sprite takes texture row `texture_height - y - height + r`, which keeps the
/// texture's top-down row order in the cropped image.
pub fn crop_sprite(texture: &RgbaImage, rect: SpriteRect) -> Result<RgbaImage> {
    let (texture_width, texture_height) = texture.dimensions();
    if !rect.fits_within(texture_width, texture_height) {
        return Err(BinaryError::corrupt(format!(
            "sprite rect {}x{} at ({}, {}) is outside the {}x{} texture",
            rect.width, rect.height, rect.x, rect.y, texture_width, texture_height
        )));
    }

    let flipped_y = texture_height - rect.y - rect.height;
    Ok(imageops::crop_imm(texture, rect.x, flipped_y, rect.width, rect.height).to_image())
}

/// Crops sprites out of their owning texture
pub struct SpriteProcessor<'a> {
    texture: &'a RgbaImage,
}

impl<'a> SpriteProcessor<'a> {
    pub fn new(texture: &'a RgbaImage) -> Self {
        Self { texture }
    }

    /// Crop one sprite into a named image
    pub fn extract(&self, sprite: &Sprite) -> Result<SpriteImage> {
        let bitmap = crop_sprite(self.texture, sprite.rect).map_err(|e| match e {
            BinaryError::CorruptData(msg) => {
                BinaryError::corrupt(format!("sprite '{}': {}", sprite.name, msg))
            }
            other => other,
        })?;
        Ok(SpriteImage {
            sprite_name: sprite.name.clone(),
            sprite_bitmap: bitmap,
        })
    }
}
