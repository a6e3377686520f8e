//! Serialized file metadata
//!
//! The assets stream opens with a serialized file: a big-endian header, then
//! little-endian metadata holding the embedded type trees and the object
//! directory.
//!
//! - `header` - SerializedFile header parsing
//! - `types` - object directory entries and the metadata container
//! - `parser` - the metadata reader

pub mod header;
pub mod parser;
pub mod types;

pub use header::SerializedFileHeader;
pub use parser::AssetMetadataReader;
pub use types::{AssetMetadata, ObjectDirectoryEntry};
