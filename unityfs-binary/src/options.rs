//! Decode configuration

use serde::{Deserialize, Serialize};

/// Options controlling a bundle decode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Longest accepted length prefix for a serialized string
    pub max_string_length: usize,
    /// Largest accepted element count for a dynamic array
    pub max_array_elements: usize,
    /// Whether to crop sprites out of the decoded texture
    pub extract_sprites: bool,
    /// Whether to decompress and parse the bundle directory
    pub decode_directory: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_string_length: 500,
            max_array_elements: 16 * 1024 * 1024,
            extract_sprites: true,
            decode_directory: true,
        }
    }
}

impl DecodeOptions {
    /// Only the primary texture: no sprite cropping, no directory parse
    pub fn texture_only() -> Self {
        Self {
            extract_sprites: false,
            decode_directory: false,
            ..Self::default()
        }
    }
}
