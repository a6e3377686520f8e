//! Texture data structures

use super::formats::TextureFormat;
use crate::error::{BinaryError, Result};
use crate::object::DecodedObject;
use serde::{Deserialize, Serialize};
use unityfs_core::DecodedValue;

/// Type name of texture objects
pub const TEXTURE2D_TYPE: &str = "Texture2D";

/// A Texture2D object ready for decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture2D {
    pub path_id: i64,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    /// Block-compressed payload, top mip level first
    pub image_data: Vec<u8>,
}

impl Texture2D {
    /// Extract a texture from a decoded `Texture2D` object
    ///
    /// Unknown formats and streamed payloads are `Unsupported`, which callers
    /// treat as object-local. Missing or out-of-range fields are corrupt.
    pub fn from_object(object: &DecodedObject) -> Result<Self> {
        let format_code = object
            .get("m_TextureFormat")
            .and_then(DecodedValue::as_i64)
            .ok_or_else(|| missing(object, "m_TextureFormat"))?;
        let format = TextureFormat::from_code(format_code)?;

        let width = dimension(object, "m_Width")?;
        let height = dimension(object, "m_Height")?;

        let image_data = object
            .get("image data")
            .and_then(DecodedValue::as_bytes)
            .ok_or_else(|| missing(object, "image data"))?;

        if image_data.is_empty() {
            let stream_path = object
                .value
                .get_path(&["m_StreamData", "path"])
                .and_then(DecodedValue::as_str)
                .unwrap_or("");
            if !stream_path.is_empty() {
                return Err(BinaryError::unsupported(format!(
                    "texture data streamed from {}",
                    stream_path
                )));
            }
        }

        Ok(Self {
            path_id: object.path_id,
            name: object.name().unwrap_or_default().to_string(),
            width,
            height,
            format,
            image_data: image_data.to_vec(),
        })
    }

    /// Low 32 bits of the path id, as carried by object references
    pub fn object_id(&self) -> i32 {
        self.path_id as i32
    }
}

fn missing(object: &DecodedObject, field: &str) -> BinaryError {
    BinaryError::corrupt(format!(
        "texture object {} has no {} field",
        object.path_id, field
    ))
}

fn dimension(object: &DecodedObject, field: &str) -> Result<u32> {
    let value = object
        .get(field)
        .and_then(DecodedValue::as_i64)
        .ok_or_else(|| missing(object, field))?;
    u32::try_from(value).map_err(|_| {
        BinaryError::corrupt(format!(
            "texture object {} has {} = {}",
            object.path_id, field, value
        ))
    })
}
