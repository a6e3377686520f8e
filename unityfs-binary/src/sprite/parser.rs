//! Sprite parsing from decoded objects

use super::types::{Sprite, SpriteRect};
use crate::error::{BinaryError, Result};
use crate::object::DecodedObject;
use unityfs_core::DecodedValue;

/// Reads `Sprite` objects out of decoded object records
pub struct SpriteParser;

impl SpriteParser {
    /// Parse a decoded `Sprite` object
    ///
    /// Polygon sprites are `Unsupported`; a missing or malformed `m_Rect` is
    /// corrupt.
    pub fn parse(object: &DecodedObject) -> Result<Sprite> {
        let name = object.name().unwrap_or_default().to_string();

        let is_polygon = object
            .get("m_IsPolygon")
            .and_then(DecodedValue::as_bool)
            .unwrap_or(false);
        if is_polygon {
            return Err(BinaryError::unsupported(format!(
                "polygon sprite '{}'",
                name
            )));
        }

        let rect_value = object.get("m_Rect").ok_or_else(|| {
            BinaryError::corrupt(format!("sprite '{}' has no m_Rect field", name))
        })?;
        let rect = SpriteRect::new(
            rect_component(rect_value, "x", &name)?,
            rect_component(rect_value, "y", &name)?,
            rect_component(rect_value, "width", &name)?,
            rect_component(rect_value, "height", &name)?,
        );

        let texture = object
            .value
            .get_path(&["m_RD", "texture"])
            .and_then(DecodedValue::as_reference);

        Ok(Sprite {
            path_id: object.path_id,
            name,
            rect,
            texture,
        })
    }
}

impl Sprite {
    /// Convenience wrapper over [`SpriteParser::parse`]
    pub fn from_object(object: &DecodedObject) -> Result<Self> {
        SpriteParser::parse(object)
    }
}

fn rect_component(rect: &DecodedValue, field: &str, sprite: &str) -> Result<u32> {
    let value = rect.get(field).and_then(DecodedValue::as_f64).ok_or_else(|| {
        BinaryError::corrupt(format!("sprite '{}' has no m_Rect.{}", sprite, field))
    })?;
    let rounded = value.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > u32::MAX as f64 {
        return Err(BinaryError::corrupt(format!(
            "sprite '{}' has m_Rect.{} = {}",
            sprite, field, value
        )));
    }
    Ok(rounded as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use unityfs_core::{ObjectRef, ScalarValue};

    fn sprite_object(rect: [f32; 4], is_polygon: bool) -> DecodedObject {
        let mut rect_fields = IndexMap::new();
        for (key, value) in ["x", "y", "width", "height"].iter().zip(rect) {
            rect_fields.insert(key.to_string(), ScalarValue::F32(value).into());
        }
        let mut render_data = IndexMap::new();
        render_data.insert("texture".to_string(), ObjectRef::new(0, 7).into());

        let mut fields = IndexMap::new();
        fields.insert("m_Name".to_string(), DecodedValue::from("button"));
        fields.insert("m_Rect".to_string(), DecodedValue::Record(rect_fields));
        fields.insert("m_IsPolygon".to_string(), ScalarValue::Bool(is_polygon).into());
        fields.insert("m_RD".to_string(), DecodedValue::Record(render_data));
        DecodedObject {
            path_id: 12,
            class_id: 213,
            type_id: 213,
            type_name: "Sprite".to_string(),
            value: DecodedValue::Record(fields),
        }
    }

    #[test]
    fn test_parse_sprite() {
        let sprite = SpriteParser::parse(&sprite_object([2.0, 3.0, 4.0, 5.0], false)).unwrap();
        assert_eq!(sprite.name, "button");
        assert_eq!(sprite.rect, SpriteRect::new(2, 3, 4, 5));
        assert_eq!(sprite.texture, Some(ObjectRef::new(0, 7)));
    }

    #[test]
    fn test_rect_is_rounded() {
        let sprite = Sprite::from_object(&sprite_object([1.9999, 0.0, 8.0001, 4.0], false)).unwrap();
        assert_eq!(sprite.rect, SpriteRect::new(2, 0, 8, 4));
    }

    #[test]
    fn test_polygon_sprite_is_unsupported() {
        let err = SpriteParser::parse(&sprite_object([0.0, 0.0, 4.0, 4.0], true)).unwrap_err();
        assert!(matches!(err, BinaryError::Unsupported(_)));
    }

    #[test]
    fn test_negative_rect_is_corrupt() {
        let err = SpriteParser::parse(&sprite_object([-4.0, 0.0, 4.0, 4.0], false)).unwrap_err();
        assert!(matches!(err, BinaryError::CorruptData(_)));

        let err = SpriteParser::parse(&sprite_object([0.0, f32::NAN, 4.0, 4.0], false)).unwrap_err();
        assert!(matches!(err, BinaryError::CorruptData(_)));
    }
}
