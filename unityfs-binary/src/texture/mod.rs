//! Texture decoding
//!
//! Turns decoded `Texture2D` objects into RGBA rasters. Only the two
//! block-compressed formats DXT1 and DXT5 are handled; everything else is
//! reported as `Unsupported` so the caller can drop the object and move on.
//!
//! - `formats` - format codes and block sizes
//! - `types` - the `Texture2D` view over a decoded object
//! - `decoders` - the block decoders and the dispatching `TextureDecoder`
//!
//! # Examples
//!
//! ```rust,no_run
//! use unityfs_binary::texture::{TextureFormat, decode_texture_data};
//!
//! let payload = vec![0u8; 8];
//! let image = decode_texture_data(TextureFormat::DXT1, 4, 4, &payload)?;
//! assert_eq!(image.dimensions(), (4, 4));
//! # Ok::<(), unityfs_binary::BinaryError>(())
//! ```

pub mod decoders;
pub mod formats;
pub mod types;

pub use decoders::{CompressedDecoder, Decoder, MAX_DIMENSION, TextureDecoder};
pub use formats::TextureFormat;
pub use types::{TEXTURE2D_TYPE, Texture2D};

use crate::error::Result;
use crate::object::DecodedObject;
use image::RgbaImage;

/// Extract and decode a texture object in one step
pub fn decode_texture(object: &DecodedObject) -> Result<(Texture2D, RgbaImage)> {
    let texture = Texture2D::from_object(object)?;
    let image = TextureDecoder::new().decode(&texture)?;
    Ok((texture, image))
}

/// Decode a raw block-compressed payload
pub fn decode_texture_data(
    format: TextureFormat,
    width: u32,
    height: u32,
    data: &[u8],
) -> Result<RgbaImage> {
    CompressedDecoder::new().decode_raw(format, data, width, height)
}
