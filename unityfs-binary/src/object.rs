//! Object-level decoding
//!
//! Matches each object directory entry to its type tree, slices the object's
//! bytes out of the assets stream, and decodes them.

use crate::asset::{AssetMetadata, ObjectDirectoryEntry};
use crate::error::Result;
use crate::options::DecodeOptions;
use crate::reader::{BinaryReader, ByteOrder};
use crate::typetree::{TypeTree, ValueDecoder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use unityfs_core::DecodedValue;

/// A decoded serialized object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedObject {
    /// Full 64-bit path id from the object directory
    pub path_id: i64,
    pub class_id: i32,
    pub type_id: i32,
    /// Type name of the root node of the matching type tree
    pub type_name: String,
    pub value: DecodedValue,
}

impl DecodedObject {
    /// Get a top-level field
    pub fn get(&self, field: &str) -> Option<&DecodedValue> {
        self.value.get(field)
    }

    /// The object's `m_Name`, if it has one
    pub fn name(&self) -> Option<&str> {
        self.get("m_Name").and_then(DecodedValue::as_str)
    }

    /// Low 32 bits of the path id, as carried by object references
    pub fn object_id(&self) -> i32 {
        self.path_id as i32
    }
}

/// Decodes the objects of one serialized file
pub struct ObjectDecoder<'a> {
    trees: &'a [TypeTree],
    options: &'a DecodeOptions,
}

impl<'a> ObjectDecoder<'a> {
    pub fn new(trees: &'a [TypeTree], options: &'a DecodeOptions) -> Self {
        Self { trees, options }
    }

    /// Find the type tree for an entry: by type id first, then by class id
    pub fn find_tree(&self, entry: &ObjectDirectoryEntry) -> Option<&'a TypeTree> {
        self.trees
            .iter()
            .find(|tree| tree.class_id == entry.type_id)
            .or_else(|| {
                self.trees
                    .iter()
                    .find(|tree| tree.class_id == entry.class_id as i32)
            })
    }

    /// Decode every object in directory order
    ///
    /// Objects without a type tree and object-local failures are logged and
    /// skipped; any other failure aborts.
    pub fn decode_all(
        &self,
        metadata: &AssetMetadata,
        assets: &[u8],
    ) -> Result<Vec<DecodedObject>> {
        let mut objects = Vec::with_capacity(metadata.objects.len());

        for (index, entry) in metadata.objects.iter().enumerate() {
            let Some(tree) = self.find_tree(entry) else {
                warn!(
                    "Type tree not found for object {} (type id {}, class id {}), skipping",
                    index, entry.type_id, entry.class_id
                );
                continue;
            };

            match self.decode_entry(entry, tree, metadata.header.data_offset, assets) {
                Ok(object) => objects.push(object),
                Err(e) if e.is_object_local() => {
                    warn!("Skipping object {}: {}", index, e);
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            "Decoded {} of {} objects",
            objects.len(),
            metadata.objects.len()
        );
        Ok(objects)
    }

    /// Decode a single object with a known type tree
    pub fn decode_entry(
        &self,
        entry: &ObjectDirectoryEntry,
        tree: &TypeTree,
        data_offset: u32,
        assets: &[u8],
    ) -> Result<DecodedObject> {
        let start = data_offset as usize + entry.data_offset as usize;
        let bytes = BinaryReader::new(assets, ByteOrder::Little)
            .slice_view(start, entry.size as usize)?;

        let mut reader = BinaryReader::new(bytes, ByteOrder::Little);
        let value = ValueDecoder::new(tree, self.options).decode_object(&mut reader)?;

        Ok(DecodedObject {
            path_id: entry.path_id(),
            class_id: entry.class_id as i32,
            type_id: entry.type_id,
            type_name: tree.type_name().to_string(),
            value,
        })
    }
}
