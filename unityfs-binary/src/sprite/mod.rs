//! Sprite extraction
//!
//! A sprite is a named rectangle of a single texture. Sprites are parsed
//! from decoded `Sprite` objects and cropped out of the decoded texture
//! raster.
//!
//! - `types` - `Sprite`, `SpriteRect` and the cropped `SpriteImage`
//! - `parser` - reading sprites out of decoded objects
//! - `processor` - bounds checking and cropping

pub mod parser;
pub mod processor;
pub mod types;

pub use parser::SpriteParser;
pub use processor::{SpriteProcessor, crop_sprite};
pub use types::{SPRITE_TYPE, Sprite, SpriteImage, SpriteRect};
