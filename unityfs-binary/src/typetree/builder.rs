//! TypeTree construction
//!
//! Resolves node names, rebuilds the hierarchy from the flat depth-tagged
//! node list, and classifies each node's shape once up front.

use super::common_strings::resolve_name;
use super::parser::RawTypeTree;
use super::types::{NodeShape, POST_ALIGN_FLAG, PrimitiveKind, TypeTree, TypeTreeNode};
use crate::error::{BinaryError, Result};

/// Element type names decoded as raw byte slices
const BYTE_ELEMENT_TYPES: [&str; 2] = ["char", "UInt8"];

/// Builds [`TypeTree`]s from raw type tree blocks
pub struct TypeTreeBuilder;

impl TypeTreeBuilder {
    /// Build a tree from a raw block
    pub fn build(raw: &RawTypeTree) -> Result<TypeTree> {
        let mut nodes: Vec<TypeTreeNode> = raw
            .nodes
            .iter()
            .map(|node| TypeTreeNode {
                version: node.version,
                depth: node.depth,
                is_array: node.is_array,
                type_name: resolve_name(node.type_offset, &raw.string_buffer),
                field_name: resolve_name(node.name_offset, &raw.string_buffer),
                byte_size: node.byte_size,
                index: node.index,
                flags: node.flags,
                post_align: node.flags & POST_ALIGN_FLAG != 0,
                children: Vec::new(),
                shape: NodeShape::Record,
            })
            .collect();

        Self::link(raw.class_id, &mut nodes)?;

        let shapes: Vec<NodeShape> = (0..nodes.len()).map(|i| classify(&nodes, i)).collect();
        for (node, shape) in nodes.iter_mut().zip(shapes) {
            node.shape = shape;
        }

        Ok(TypeTree {
            class_id: raw.class_id,
            nodes,
        })
    }

    /// Attach every node to its parent using a stack of open ancestors
    fn link(class_id: i32, nodes: &mut [TypeTreeNode]) -> Result<()> {
        match nodes.first() {
            None => {
                return Err(BinaryError::corrupt(format!(
                    "Type tree for class {} has no nodes",
                    class_id
                )));
            }
            Some(root) if root.depth != 0 => {
                return Err(BinaryError::corrupt(format!(
                    "Type tree for class {} starts at depth {}",
                    class_id, root.depth
                )));
            }
            Some(_) => {}
        }

        let mut stack = vec![TypeTree::ROOT];
        for index in 1..nodes.len() {
            let depth = nodes[index].depth as usize;
            if depth == 0 {
                return Err(BinaryError::corrupt(format!(
                    "Type tree for class {} has a second root at node {}",
                    class_id, index
                )));
            }
            stack.truncate(depth);
            if stack.len() != depth {
                return Err(BinaryError::corrupt(format!(
                    "Type tree for class {} skips from depth {} to {} at node {}",
                    class_id,
                    stack.len() - 1,
                    depth,
                    index
                )));
            }
            let parent = stack[depth - 1];
            nodes[parent].children.push(index);
            stack.push(index);
        }
        Ok(())
    }
}

fn classify(nodes: &[TypeTreeNode], index: usize) -> NodeShape {
    let node = &nodes[index];
    let type_name = node.type_name();

    if let Some(kind) = PrimitiveKind::from_type_name(type_name) {
        return NodeShape::Primitive(kind);
    }
    if type_name == "string" {
        return NodeShape::Text;
    }
    if type_name.starts_with("PPtr<") {
        return NodeShape::Reference;
    }

    let descriptor = if node.is_array {
        Some(index)
    } else {
        node.children.first().copied().filter(|&c| nodes[c].is_array)
    };
    if let Some(descriptor) = descriptor {
        let element = nodes[descriptor].children.get(1).copied();
        let raw_bytes =
            element.is_some_and(|e| BYTE_ELEMENT_TYPES.contains(&nodes[e].type_name()));
        return NodeShape::DynamicArray {
            descriptor,
            element,
            raw_bytes,
        };
    }

    if type_name == "pair" {
        NodeShape::Pair
    } else {
        NodeShape::Record
    }
}
