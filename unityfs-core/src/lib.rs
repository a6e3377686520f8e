//! UnityFS Core
//!
//! Core data structures shared by the UnityFS decoding crates.
//! The value model here is what the type-tree driven decoder produces for
//! every serialized object.

pub mod value;

// Re-export main types
pub use value::{DecodedValue, ObjectRef, ScalarValue};
