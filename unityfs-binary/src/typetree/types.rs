//! TypeTree data structures
//!
//! A built type tree is an arena: nodes live in one vector in their original
//! pre-order, and each node refers to its children by index.

use serde::{Deserialize, Serialize};

/// Meta flag marking that the cursor aligns to 4 bytes after the node
pub const POST_ALIGN_FLAG: i32 = 0x4000;

/// Primitive scalar kinds and their on-disk widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Bool,
    I8,
    U8,
    Char,
    I16,
    U16,
    I32,
    U32,
    /// 8 bytes on disk, only the low word is kept
    I64,
    /// 8 bytes on disk, only the low word is kept
    U64,
    F32,
    F64,
}

impl PrimitiveKind {
    /// Classify a type name
    pub fn from_type_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => PrimitiveKind::Bool,
            "SInt8" => PrimitiveKind::I8,
            "UInt8" => PrimitiveKind::U8,
            "char" => PrimitiveKind::Char,
            "SInt16" | "short" => PrimitiveKind::I16,
            "UInt16" | "unsigned short" => PrimitiveKind::U16,
            "SInt32" | "int" => PrimitiveKind::I32,
            "UInt32" | "unsigned" | "unsigned int" => PrimitiveKind::U32,
            "SInt64" | "long long" => PrimitiveKind::I64,
            "UInt64" | "unsigned long long" => PrimitiveKind::U64,
            "float" => PrimitiveKind::F32,
            "double" => PrimitiveKind::F64,
            _ => return None,
        };
        Some(kind)
    }

    /// Only `float` is 4-byte aligned before the read
    pub fn aligns_before(self) -> bool {
        matches!(self, PrimitiveKind::F32)
    }
}

/// How the decoder interprets a node, fixed when the tree is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeShape {
    Primitive(PrimitiveKind),
    /// Length-prefixed string
    Text,
    /// `PPtr<T>` weak object reference
    Reference,
    /// Length-prefixed array described by `descriptor` (the node itself or
    /// its first child); `element` is the descriptor's second child
    DynamicArray {
        descriptor: usize,
        element: Option<usize>,
        raw_bytes: bool,
    },
    Pair,
    Record,
}

/// A node in a built type tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTreeNode {
    pub version: i16,
    pub depth: u8,
    pub is_array: bool,
    /// Type name (e.g., "int", "string", "Texture2D")
    pub type_name: Option<String>,
    /// Field name (e.g., "m_Name", "image data")
    pub field_name: Option<String>,
    /// Size in bytes (-1 for variable size)
    pub byte_size: i32,
    pub index: u32,
    pub flags: i32,
    /// Cursor aligns to 4 bytes after this node's value
    pub post_align: bool,
    /// Child indices in declaration order
    pub children: Vec<usize>,
    pub shape: NodeShape,
}

impl TypeTreeNode {
    /// Type name, or "" when unresolved
    pub fn type_name(&self) -> &str {
        self.type_name.as_deref().unwrap_or("")
    }

    /// Field name, or "" when unresolved
    pub fn field_name(&self) -> &str {
        self.field_name.as_deref().unwrap_or("")
    }
}

/// A type tree for one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTree {
    /// Class id this tree describes
    pub class_id: i32,
    /// Nodes in pre-order; index 0 is the root
    pub nodes: Vec<TypeTreeNode>,
}

impl TypeTree {
    /// Index of the root node
    pub const ROOT: usize = 0;

    /// Get the root node
    pub fn root(&self) -> Option<&TypeTreeNode> {
        self.nodes.first()
    }

    /// Get a node by index
    pub fn node(&self, index: usize) -> Option<&TypeTreeNode> {
        self.nodes.get(index)
    }

    /// Type name of the root, which names the object's type
    pub fn type_name(&self) -> &str {
        self.root().map(TypeTreeNode::type_name).unwrap_or("")
    }

    /// Find a direct child by field name
    pub fn find_child(&self, index: usize, field_name: &str) -> Option<usize> {
        self.nodes
            .get(index)?
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].field_name() == field_name)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
