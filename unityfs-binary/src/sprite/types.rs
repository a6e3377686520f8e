//! Sprite data structures

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use unityfs_core::ObjectRef;

/// Type name of sprite objects
pub const SPRITE_TYPE: &str = "Sprite";

/// Sprite rectangle in texture pixel space
///
/// `m_Rect` is stored as floats; sprites that reach the cropper always carry
/// whole pixel values, so the rectangle is rounded once when it is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SpriteRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Whether the rectangle lies inside a `width` x `height` texture
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }
}

/// A Sprite object ready for cropping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub path_id: i64,
    pub name: String,
    pub rect: SpriteRect,
    /// `m_RD.texture`, when the object carries render data
    pub texture: Option<ObjectRef>,
}

/// A sprite cut out of its texture
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteImage {
    pub sprite_name: String,
    pub sprite_bitmap: RgbaImage,
}
