//! Decoded value types
//!
//! This module defines the DecodedValue tree produced by walking a serialized
//! type tree over an object's raw bytes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A primitive scalar read from object data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    /// 64-bit field of which only the low 32-bit word was kept
    I64(i64),
    /// 64-bit field of which only the low 32-bit word was kept
    U64(u64),
    F32(f32),
    F64(f64),
}

impl ScalarValue {
    /// Get as integer (booleans map to 0/1, floats are not converted)
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            ScalarValue::Bool(b) => Some(b as i64),
            ScalarValue::I8(v) => Some(v as i64),
            ScalarValue::U8(v) => Some(v as i64),
            ScalarValue::I16(v) => Some(v as i64),
            ScalarValue::U16(v) => Some(v as i64),
            ScalarValue::I32(v) => Some(v as i64),
            ScalarValue::U32(v) => Some(v as i64),
            ScalarValue::I64(v) => Some(v),
            ScalarValue::U64(v) => i64::try_from(v).ok(),
            ScalarValue::F32(_) | ScalarValue::F64(_) => None,
        }
    }

    /// Get as float, widening integers
    pub fn as_f64(&self) -> f64 {
        match *self {
            ScalarValue::F32(v) => v as f64,
            ScalarValue::F64(v) => v,
            ScalarValue::U64(v) => v as f64,
            other => other.as_i64().unwrap_or_default() as f64,
        }
    }

    /// Interpret as a boolean (non-zero is true)
    pub fn as_bool(&self) -> bool {
        match *self {
            ScalarValue::Bool(b) => b,
            ScalarValue::F32(v) => v != 0.0,
            ScalarValue::F64(v) => v != 0.0,
            other => other.as_i64().is_some_and(|v| v != 0),
        }
    }

    /// Name of the scalar kind
    pub fn kind(&self) -> &'static str {
        match self {
            ScalarValue::Bool(_) => "bool",
            ScalarValue::I8(_) => "SInt8",
            ScalarValue::U8(_) => "UInt8",
            ScalarValue::I16(_) => "SInt16",
            ScalarValue::U16(_) => "UInt16",
            ScalarValue::I32(_) => "SInt32",
            ScalarValue::U32(_) => "UInt32",
            ScalarValue::I64(_) => "SInt64",
            ScalarValue::U64(_) => "UInt64",
            ScalarValue::F32(_) => "float",
            ScalarValue::F64(_) => "double",
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::F32(v) => write!(f, "{}", v),
            ScalarValue::F64(v) => write!(f, "{}", v),
            ScalarValue::U64(v) => write!(f, "{}", v),
            other => write!(f, "{}", other.as_i64().unwrap_or_default()),
        }
    }
}

/// Weak reference to another serialized object (a `PPtr<T>`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Index into the external file table, 0 for the same file
    pub file_index: i32,
    /// Low 32 bits of the referenced path id
    pub object_id: i32,
}

impl ObjectRef {
    pub fn new(file_index: i32, object_id: i32) -> Self {
        Self {
            file_index,
            object_id,
        }
    }

    /// Check if this reference points nowhere
    pub fn is_null(&self) -> bool {
        self.file_index == 0 && self.object_id == 0
    }

    /// Check if the target lives in the same serialized file
    pub fn is_local(&self) -> bool {
        self.file_index == 0
    }
}

/// A value decoded from a serialized object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecodedValue {
    Scalar(ScalarValue),
    Bytes(Vec<u8>),
    Text(String),
    Sequence(Vec<DecodedValue>),
    /// Fields in declaration order
    Record(IndexMap<String, DecodedValue>),
    Reference(ObjectRef),
}

impl DecodedValue {
    /// Get a field of a record
    pub fn get(&self, field: &str) -> Option<&DecodedValue> {
        match self {
            DecodedValue::Record(fields) => fields.get(field),
            _ => None,
        }
    }

    /// Follow a chain of record fields
    pub fn get_path(&self, path: &[&str]) -> Option<&DecodedValue> {
        path.iter().try_fold(self, |value, field| value.get(field))
    }

    /// Get as scalar
    pub fn as_scalar(&self) -> Option<ScalarValue> {
        match self {
            DecodedValue::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// Get as integer
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(|s| s.as_i64())
    }

    /// Get as float
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().map(|s| s.as_f64())
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().map(|s| s.as_bool())
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as raw bytes
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DecodedValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get as sequence
    pub fn as_sequence(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get as record
    pub fn as_record(&self) -> Option<&IndexMap<String, DecodedValue>> {
        match self {
            DecodedValue::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get as object reference
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            DecodedValue::Reference(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Scalar(s) => write!(f, "{}", s),
            DecodedValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            DecodedValue::Text(s) => write!(f, "{:?}", s),
            DecodedValue::Reference(r) => {
                write!(f, "PPtr(file: {}, id: {})", r.file_index, r.object_id)
            }
            DecodedValue::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            DecodedValue::Record(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<ScalarValue> for DecodedValue {
    fn from(s: ScalarValue) -> Self {
        DecodedValue::Scalar(s)
    }
}

impl From<ObjectRef> for DecodedValue {
    fn from(r: ObjectRef) -> Self {
        DecodedValue::Reference(r)
    }
}

impl From<String> for DecodedValue {
    fn from(s: String) -> Self {
        DecodedValue::Text(s)
    }
}

impl From<&str> for DecodedValue {
    fn from(s: &str) -> Self {
        DecodedValue::Text(s.to_string())
    }
}
