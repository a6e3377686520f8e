//! Type-tree driven value decoding
//!
//! Walks a built [`TypeTree`] over an object's bytes and produces a
//! [`DecodedValue`]. All reads are little-endian and bounded by the object's
//! own byte range.

use super::types::{NodeShape, PrimitiveKind, TypeTree, TypeTreeNode};
use crate::error::{BinaryError, Result};
use crate::options::DecodeOptions;
use crate::reader::{BinaryReader, latin1};
use indexmap::IndexMap;
use unityfs_core::{DecodedValue, ObjectRef, ScalarValue};

/// Decodes object bodies using one type tree
pub struct ValueDecoder<'t> {
    tree: &'t TypeTree,
    options: &'t DecodeOptions,
}

impl<'t> ValueDecoder<'t> {
    /// Create a new decoder for a type tree
    pub fn new(tree: &'t TypeTree, options: &'t DecodeOptions) -> Self {
        Self { tree, options }
    }

    /// Decode a whole object starting at the root node
    pub fn decode_object(&self, reader: &mut BinaryReader) -> Result<DecodedValue> {
        self.decode(TypeTree::ROOT, reader)
    }

    /// Decode the value described by node `index`
    pub fn decode(&self, index: usize, reader: &mut BinaryReader) -> Result<DecodedValue> {
        let node = self.node(index)?;
        let mut align = false;

        let value = match node.shape {
            NodeShape::Primitive(kind) => read_primitive(kind, reader)?,
            NodeShape::Text => {
                align = node
                    .children
                    .first()
                    .is_some_and(|&child| self.tree.nodes[child].post_align);
                self.read_text(reader)?
            }
            NodeShape::Reference => {
                let file_index = reader.read_i32()?;
                let object_id = reader.read_i32()?;
                let _high = reader.read_i32()?;
                DecodedValue::Reference(ObjectRef::new(file_index, object_id))
            }
            NodeShape::DynamicArray {
                descriptor,
                element,
                raw_bytes,
            } => {
                align = self.node(descriptor)?.post_align;
                self.read_array(node, element, raw_bytes, reader)?
            }
            NodeShape::Pair => {
                if node.children.len() != 2 {
                    return Err(BinaryError::corrupt(format!(
                        "pair '{}' has {} children",
                        node.field_name(),
                        node.children.len()
                    )));
                }
                let mut fields = IndexMap::with_capacity(2);
                fields.insert("first".to_string(), self.decode(node.children[0], reader)?);
                fields.insert("second".to_string(), self.decode(node.children[1], reader)?);
                DecodedValue::Record(fields)
            }
            NodeShape::Record => self.read_record(node, reader)?,
        };

        if align || node.post_align {
            reader.align()?;
        }
        Ok(value)
    }

    fn node(&self, index: usize) -> Result<&'t TypeTreeNode> {
        self.tree
            .node(index)
            .ok_or_else(|| BinaryError::corrupt(format!("type tree node {} out of range", index)))
    }

    fn read_text(&self, reader: &mut BinaryReader) -> Result<DecodedValue> {
        let length = reader.read_u32()? as usize;
        if length > self.options.max_string_length {
            return Err(BinaryError::corrupt(format!(
                "string length {} exceeds limit {}",
                length, self.options.max_string_length
            )));
        }
        Ok(DecodedValue::Text(latin1(reader.read_slice(length)?)))
    }

    fn read_array(
        &self,
        node: &TypeTreeNode,
        element: Option<usize>,
        raw_bytes: bool,
        reader: &mut BinaryReader,
    ) -> Result<DecodedValue> {
        let element = element.ok_or_else(|| {
            BinaryError::corrupt(format!(
                "array '{}' has no element type",
                node.field_name()
            ))
        })?;

        let count = reader.read_u32()? as usize;
        if count > self.options.max_array_elements {
            return Err(BinaryError::corrupt(format!(
                "array '{}' has {} elements, limit is {}",
                node.field_name(),
                count,
                self.options.max_array_elements
            )));
        }

        if raw_bytes {
            return Ok(DecodedValue::Bytes(reader.read_bytes(count)?));
        }

        let mut items = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            let start = reader.position();
            items.push(self.decode(element, reader)?);
            // Zero-width elements cannot outnumber the bytes left in the object
            if reader.position() == start && count > reader.remaining() {
                return Err(BinaryError::corrupt(format!(
                    "array '{}' declares {} empty elements with {} bytes left",
                    node.field_name(),
                    count,
                    reader.remaining()
                )));
            }
        }
        Ok(DecodedValue::Sequence(items))
    }

    fn read_record(&self, node: &TypeTreeNode, reader: &mut BinaryReader) -> Result<DecodedValue> {
        let mut fields = IndexMap::with_capacity(node.children.len());
        for &child in &node.children {
            let value = self.decode(child, reader)?;
            fields.insert(self.tree.nodes[child].field_name().to_string(), value);
        }

        // Streamed payloads are never fetched; the location is exposed as-is
        let alias = match node.type_name() {
            "StreamedResource" => fields.get("source").cloned(),
            "StreamingInfo" => fields.get("path").cloned(),
            _ => None,
        };
        if let Some(asset) = alias {
            fields.insert("asset".to_string(), asset);
        }

        Ok(DecodedValue::Record(fields))
    }
}

fn read_primitive(kind: PrimitiveKind, reader: &mut BinaryReader) -> Result<DecodedValue> {
    if kind.aligns_before() {
        reader.align()?;
    }
    let scalar = match kind {
        PrimitiveKind::Bool => ScalarValue::Bool(reader.read_bool()?),
        PrimitiveKind::I8 => ScalarValue::I8(reader.read_i8()?),
        PrimitiveKind::U8 | PrimitiveKind::Char => ScalarValue::U8(reader.read_u8()?),
        PrimitiveKind::I16 => ScalarValue::I16(reader.read_i16()?),
        PrimitiveKind::U16 => ScalarValue::U16(reader.read_u16()?),
        PrimitiveKind::I32 => ScalarValue::I32(reader.read_i32()?),
        PrimitiveKind::U32 => ScalarValue::U32(reader.read_u32()?),
        PrimitiveKind::I64 => {
            let low = reader.read_i32()?;
            let _high = reader.read_i32()?;
            ScalarValue::I64(low as i64)
        }
        PrimitiveKind::U64 => {
            let low = reader.read_u32()?;
            let _high = reader.read_u32()?;
            ScalarValue::U64(low as u64)
        }
        PrimitiveKind::F32 => ScalarValue::F32(reader.read_f32()?),
        PrimitiveKind::F64 => ScalarValue::F64(reader.read_f64()?),
    };
    Ok(DecodedValue::Scalar(scalar))
}
