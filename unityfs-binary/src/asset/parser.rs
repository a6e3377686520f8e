//! Serialized file metadata parser

use super::header::SerializedFileHeader;
use super::types::{AssetMetadata, OBJECT_RECORD_PADDING, ObjectDirectoryEntry};
use crate::error::{BinaryError, Result};
use crate::reader::{BinaryReader, ByteOrder};
use crate::typetree::RawTypeTree;
use tracing::debug;

/// On-disk size of one object record including its padding
const OBJECT_RECORD_SIZE: usize = OBJECT_RECORD_PADDING + 25;

/// Reads the metadata section at the start of the assets stream
pub struct AssetMetadataReader;

impl AssetMetadataReader {
    /// Parse metadata from the assets stream
    pub fn parse(assets: &[u8]) -> Result<AssetMetadata> {
        let mut reader = BinaryReader::new(assets, ByteOrder::Big);
        let header = SerializedFileHeader::from_reader(&mut reader)?;
        reader.set_byte_order(header.byte_order());

        let generator_version = reader.read_cstring()?;
        let target_platform = reader.read_u32()?;
        let has_type_trees = reader.read_bool()?;

        let type_count = reader.read_i32()?;
        let type_count = usize::try_from(type_count)
            .map_err(|_| BinaryError::corrupt(format!("Negative type count: {}", type_count)))?;
        let mut types = Vec::with_capacity(type_count.min(reader.remaining() / 28));
        for _ in 0..type_count {
            types.push(RawTypeTree::from_reader(&mut reader)?);
        }

        let object_count = reader.read_u32()? as usize;
        let needed = object_count.saturating_mul(OBJECT_RECORD_SIZE);
        if needed > reader.remaining() {
            return Err(BinaryError::truncated(needed, reader.remaining()));
        }
        let mut objects = Vec::with_capacity(object_count);
        for _ in 0..object_count {
            objects.push(ObjectDirectoryEntry::from_reader(&mut reader)?);
        }

        let script_types = reader.read_u32()?;
        if script_types != 0 {
            return Err(BinaryError::unsupported(format!(
                "{} script type references",
                script_types
            )));
        }
        let externals = reader.read_u32()?;
        if externals != 0 {
            return Err(BinaryError::unsupported(format!(
                "{} external file references",
                externals
            )));
        }

        let trailing = reader.read_cstring()?;

        debug!(
            generator_version = %generator_version,
            format = header.format,
            types = types.len(),
            objects = objects.len(),
            "Parsed serialized file metadata"
        );

        Ok(AssetMetadata {
            header,
            generator_version,
            target_platform,
            has_type_trees,
            types,
            objects,
            trailing,
        })
    }
}

impl AssetMetadata {
    /// Parse metadata from the assets stream
    pub fn from_bytes(assets: &[u8]) -> Result<Self> {
        AssetMetadataReader::parse(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_bytes(num_adds: u32, num_refs: u32) -> Vec<u8> {
        let mut data = Vec::new();
        for field in [0u32, 0, 17, 64] {
            data.extend_from_slice(&field.to_be_bytes());
        }
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.extend_from_slice(b"2017.4.3f1\0");
        data.extend_from_slice(&5u32.to_le_bytes());
        data.push(1);
        data.extend_from_slice(&0i32.to_le_bytes());

        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&[0, 0, 0]);
        for field in [9i32, 0, 0, 12, 28] {
            data.extend_from_slice(&field.to_le_bytes());
        }
        data.extend_from_slice(&28i16.to_le_bytes());
        data.extend_from_slice(&(-1i16).to_le_bytes());
        data.push(0);

        data.extend_from_slice(&num_adds.to_le_bytes());
        data.extend_from_slice(&num_refs.to_le_bytes());
        data.push(0);
        data
    }

    #[test]
    fn test_parse_metadata() {
        let metadata = AssetMetadata::from_bytes(&metadata_bytes(0, 0)).unwrap();
        assert_eq!(metadata.generator_version, "2017.4.3f1");
        assert_eq!(metadata.target_platform, 5);
        assert!(metadata.has_type_trees);
        assert!(metadata.types.is_empty());
        assert_eq!(metadata.objects.len(), 1);

        let object = metadata.objects[0];
        assert_eq!(object.path_id(), 9);
        assert_eq!(object.size, 12);
        assert_eq!(object.type_id, 28);
        assert_eq!(object.class_id, 28);
        assert_eq!(metadata.trailing, "");
    }

    #[test]
    fn test_script_types_unsupported() {
        assert!(matches!(
            AssetMetadata::from_bytes(&metadata_bytes(2, 0)),
            Err(BinaryError::Unsupported(_))
        ));
    }

    #[test]
    fn test_external_references_unsupported() {
        let err = AssetMetadata::from_bytes(&metadata_bytes(0, 1)).unwrap_err();
        assert!(matches!(err, BinaryError::Unsupported(ref msg) if msg.contains("external")));
    }

    #[test]
    fn test_truncated_metadata() {
        let data = metadata_bytes(0, 0);
        for len in [0, 10, 20, 40, data.len() - 1] {
            assert!(
                matches!(
                    AssetMetadata::from_bytes(&data[..len]),
                    Err(BinaryError::TruncatedInput { .. })
                ),
                "length {}",
                len
            );
        }
    }
}
