//! UnityFS Asset Decoder
//!
//! Decodes Unity UnityFS asset bundles into their texture image and sprite
//! images. The decoding itself lives in `unityfs-binary`; the value model
//! shared by decoded objects lives in `unityfs-core`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use unityfs_asset::decode_bundle;
//!
//! let data = std::fs::read("icon.sd")?;
//! if let Some(image) = decode_bundle(&data)? {
//!     println!("{}: {:?}", image.image_name, image.image_bitmap.dimensions());
//!     for sprite in &image.sprites {
//!         println!("  {}: {:?}", sprite.sprite_name, sprite.sprite_bitmap.dimensions());
//!     }
//! }
//! # Ok::<(), unityfs_asset::BinaryError>(())
//! ```

pub use unityfs_core::{DecodedValue, ObjectRef, ScalarValue};

pub use unityfs_binary::{
    AssetBundle, BinaryError, BundleHeader, BundleImage, DecodeOptions, DecodedBundle,
    DecodedObject, Directory, Result, Sprite, SpriteImage, SpriteRect, Texture2D, TextureFormat,
    decode_bundle, decode_bundle_with_options, decode_objects, extract_images,
};

/// Lower-level decoding stages
pub mod binary {
    pub use unityfs_binary::*;
}
