//! Shared table of common type and field names
//!
//! Name offsets with the high bit set index into this table instead of the
//! block's own string buffer. Entries are separated by a single space, so
//! multi-word names such as `unsigned int` resolve to their first word.

/// Space-delimited table; the trailing space terminates the last entry
pub const COMMON_STRINGS: &str = "AABB AnimationClip AnimationCurve AnimationState Array Base BitField bitset bool char ColorRGBA Component data deque double dynamic_array FastPropertyName first float Font GameObject Generic Mono GradientNEW GUID GUIStyle int list long long map Matrix4x4f MdFour MonoBehaviour MonoScript m_ByteSize m_Curve m_EditorClassIdentifier m_EditorHideFlags m_Enabled m_ExtensionPtr m_GameObject m_Index m_IsArray m_IsStatic m_MetaFlag m_Name m_ObjectHideFlags m_PrefabInternal m_PrefabParentObject m_Script m_StaticEditorFlags m_Type m_Version Object pair PPtr<Component> PPtr<GameObject> PPtr<Material> PPtr<MonoBehaviour> PPtr<MonoScript> PPtr<Object> PPtr<Prefab> PPtr<Sprite> PPtr<TextAsset> PPtr<Texture> PPtr<Texture2D> PPtr<Transform> Prefab Quaternionf Rectf RectInt RectOffset second set short size SInt16 SInt32 SInt64 SInt8 staticvector string TextAsset TextMesh Texture Texture2D Transform TypelessData UInt16 UInt32 UInt64 UInt8 unsigned int unsigned long long unsigned short vector Vector2f Vector3f Vector4f m_ScriptingClassIdentifier Gradient ";

/// High bit marking a common-table offset
pub const COMMON_STRING_FLAG: u32 = 0x8000_0000;

/// Look up the name starting at `offset` (high bit already masked)
pub fn common_string(offset: u32) -> Option<&'static str> {
    let start = offset as usize;
    let rest = COMMON_STRINGS.get(start..)?;
    let end = rest.find(' ')?;
    Some(&rest[..end])
}

/// Resolve a node name offset against the common table or a local buffer
pub fn resolve_name(offset: i32, buffer: &[u8]) -> Option<String> {
    if offset < 0 {
        return common_string(offset as u32 & !COMMON_STRING_FLAG).map(str::to_string);
    }
    let start = offset as usize;
    if start >= buffer.len() {
        return None;
    }
    let rest = &buffer[start..];
    let end = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
    Some(crate::reader::latin1(&rest[..end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common(offset: u32) -> i32 {
        (offset | COMMON_STRING_FLAG) as i32
    }

    #[test]
    fn test_common_table_lookup() {
        assert_eq!(common_string(0), Some("AABB"));
        assert_eq!(common_string(5), Some("AnimationClip"));
        let base = COMMON_STRINGS.find("Base").unwrap() as u32;
        assert_eq!(resolve_name(common(base), &[]), Some("Base".to_string()));
        let name = COMMON_STRINGS.find("m_Name").unwrap() as u32;
        assert_eq!(resolve_name(common(name), &[]), Some("m_Name".to_string()));
    }

    #[test]
    fn test_last_entry_and_out_of_range() {
        let last = COMMON_STRINGS.find("Gradient ").unwrap() as u32;
        assert_eq!(common_string(last), Some("Gradient"));
        assert_eq!(common_string(COMMON_STRINGS.len() as u32), None);
        assert_eq!(common_string(u32::MAX >> 1), None);
    }

    #[test]
    fn test_multi_word_entries_split_on_space() {
        let offset = COMMON_STRINGS.find("unsigned int").unwrap() as u32;
        assert_eq!(common_string(offset), Some("unsigned"));
    }

    #[test]
    fn test_local_buffer() {
        let buffer = b"Sprite\0m_Rect\0tail";
        assert_eq!(resolve_name(0, buffer), Some("Sprite".to_string()));
        assert_eq!(resolve_name(7, buffer), Some("m_Rect".to_string()));
        assert_eq!(resolve_name(14, buffer), Some("tail".to_string()));
        assert_eq!(resolve_name(buffer.len() as i32, buffer), None);
    }
}
