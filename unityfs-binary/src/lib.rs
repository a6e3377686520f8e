//! UnityFS Asset Bundle Decoder
//!
//! Decodes a UnityFS asset bundle held in memory into its texture image and
//! the sprites cut from it:
//!
//! - **Envelope**: the big-endian UnityFS header, directory blob and assets stream
//! - **Directory**: LZ4 or stored block list and file nodes
//! - **TypeTree**: embedded per-class layouts driving a generic value decoder
//! - **Objects**: every serialized object decoded into a `DecodedValue` tree
//! - **Textures**: DXT1 and DXT5 block decoding into RGBA rasters
//! - **Sprites**: rectangle cropping out of the decoded texture
//!
//! The library performs no file I/O; callers hand it a byte buffer.
//!
//! # Example
//!
//! ```rust,no_run
//! use unityfs_binary::{DecodeOptions, decode_objects};
//!
//! let data = std::fs::read("icon.sd")?;
//! let decoded = decode_objects(&data, &DecodeOptions::default())?;
//! for object in &decoded.objects {
//!     println!("{} {}", object.path_id, object.type_name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod asset;
pub mod bundle;
pub mod compression;
pub mod error;
pub mod extract;
pub mod object;
pub mod options;
pub mod reader;
pub mod sprite;
pub mod texture;
pub mod typetree;

pub use asset::{AssetMetadata, ObjectDirectoryEntry, SerializedFileHeader};
pub use bundle::{AssetBundle, BundleHeader, Directory, DirectoryNode};
pub use compression::{CompressionBlock, CompressionType, Decompressor, Lz4Decompressor};
pub use error::{BinaryError, Result};
pub use extract::{
    BundleImage, DecodedBundle, decode_bundle, decode_bundle_with_options, decode_objects,
    decode_objects_with_decompressor, extract_images,
};
pub use object::{DecodedObject, ObjectDecoder};
pub use options::DecodeOptions;
pub use reader::{BinaryReader, ByteOrder};
pub use sprite::{Sprite, SpriteImage, SpriteRect};
pub use texture::{Texture2D, TextureDecoder, TextureFormat};
pub use typetree::{TypeTree, TypeTreeNode};

pub use unityfs_core::{DecodedValue, ObjectRef, ScalarValue};
