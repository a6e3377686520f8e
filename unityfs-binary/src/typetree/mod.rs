//! Unity TypeTree processing module
//!
//! Serialized files embed one type tree per class they contain. A tree
//! describes an object's field layout and drives the generic value decoder.
//!
//! - `parser` - raw type tree blocks as stored on disk
//! - `common_strings` - the shared table of common type and field names
//! - `builder` - name resolution, hierarchy and shape classification
//! - `types` - the built, index-addressed tree
//! - `decoder` - object decoding driven by a built tree
//!
//! # Examples
//!
//! ```rust,no_run
//! use unityfs_binary::typetree::{RawTypeTree, TypeTreeBuilder, ValueDecoder};
//! use unityfs_binary::reader::{BinaryReader, ByteOrder};
//! use unityfs_binary::DecodeOptions;
//!
//! # let block: Vec<u8> = Vec::new();
//! # let object: Vec<u8> = Vec::new();
//! let mut reader = BinaryReader::new(&block, ByteOrder::Little);
//! let tree = TypeTreeBuilder::build(&RawTypeTree::from_reader(&mut reader)?)?;
//!
//! let options = DecodeOptions::default();
//! let mut object_reader = BinaryReader::new(&object, ByteOrder::Little);
//! let value = ValueDecoder::new(&tree, &options).decode_object(&mut object_reader)?;
//! # Ok::<(), unityfs_binary::BinaryError>(())
//! ```

pub mod builder;
pub mod common_strings;
pub mod decoder;
pub mod parser;
pub mod types;

pub use builder::TypeTreeBuilder;
pub use common_strings::{COMMON_STRINGS, common_string, resolve_name};
pub use decoder::ValueDecoder;
pub use parser::{RawTypeTree, RawTypeTreeNode};
pub use types::{NodeShape, PrimitiveKind, TypeTree, TypeTreeNode};
