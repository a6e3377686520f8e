//! Synthetic UnityFS bundle builder shared by the integration tests

#![allow(dead_code)]

pub const POST_ALIGN: i32 = 0x4000;

pub const TEXTURE2D_CLASS: i32 = 28;
pub const SPRITE_CLASS: i32 = 213;

/// One node of a type tree: (depth, type name, field name, is_array, flags)
pub type NodeSpec = (u8, &'static str, &'static str, bool, i32);

/// Serialize a type tree block with every name in the local string buffer
pub fn type_tree_block(class_id: i32, spec: &[NodeSpec]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut nodes = Vec::new();
    for (index, &(depth, type_name, field_name, is_array, flags)) in spec.iter().enumerate() {
        let type_offset = buffer.len() as i32;
        buffer.extend_from_slice(type_name.as_bytes());
        buffer.push(0);
        let name_offset = buffer.len() as i32;
        buffer.extend_from_slice(field_name.as_bytes());
        buffer.push(0);

        nodes.extend_from_slice(&1i16.to_le_bytes());
        nodes.push(depth);
        nodes.push(is_array as u8);
        nodes.extend_from_slice(&type_offset.to_le_bytes());
        nodes.extend_from_slice(&name_offset.to_le_bytes());
        nodes.extend_from_slice(&(-1i32).to_le_bytes());
        nodes.extend_from_slice(&(index as u32).to_le_bytes());
        nodes.extend_from_slice(&flags.to_le_bytes());
    }

    let mut block = class_id.to_le_bytes().to_vec();
    block.extend(vec![0u8; if class_id < 0 { 0x20 } else { 0x10 }]);
    block.extend_from_slice(&(spec.len() as u32).to_le_bytes());
    block.extend_from_slice(&(buffer.len() as u32).to_le_bytes());
    block.extend(nodes);
    block.extend(buffer);
    block
}

/// Nodes of a `string` field at `depth`
pub fn string_nodes(depth: u8, field: &'static str) -> Vec<NodeSpec> {
    vec![
        (depth, "string", field, false, 0),
        (depth + 1, "Array", "Array", true, POST_ALIGN),
        (depth + 2, "int", "size", false, 0),
        (depth + 2, "char", "data", false, 0),
    ]
}

pub fn texture2d_tree() -> Vec<NodeSpec> {
    let mut spec = vec![(0, "Texture2D", "Base", false, 0)];
    spec.extend(string_nodes(1, "m_Name"));
    spec.extend([
        (1, "int", "m_Width", false, 0),
        (1, "int", "m_Height", false, 0),
        (1, "int", "m_TextureFormat", false, 0),
        (1, "bool", "m_IsReadable", false, POST_ALIGN),
        (1, "TypelessData", "image data", true, POST_ALIGN),
        (2, "int", "size", false, 0),
        (2, "UInt8", "data", false, 0),
        (1, "StreamingInfo", "m_StreamData", false, 0),
        (2, "unsigned int", "offset", false, 0),
        (2, "unsigned int", "size", false, 0),
    ]);
    spec.extend(string_nodes(2, "path"));
    spec
}

pub fn sprite_tree() -> Vec<NodeSpec> {
    let mut spec = vec![(0, "Sprite", "Base", false, 0)];
    spec.extend(string_nodes(1, "m_Name"));
    spec.extend([
        (1, "Rectf", "m_Rect", false, 0),
        (2, "float", "x", false, 0),
        (2, "float", "y", false, 0),
        (2, "float", "width", false, 0),
        (2, "float", "height", false, 0),
        (1, "bool", "m_IsPolygon", false, POST_ALIGN),
        (1, "SpriteRenderData", "m_RD", false, 0),
        (2, "PPtr<Texture2D>", "texture", false, 0),
        (3, "int", "m_FileID", false, 0),
        (3, "SInt64", "m_PathID", false, 0),
    ]);
    spec
}

/// Little-endian object body writer
#[derive(Default)]
pub struct ObjectWriter {
    pub data: Vec<u8>,
}

impl ObjectWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(&mut self) -> &mut Self {
        while self.data.len() % 4 != 0 {
            self.data.push(0);
        }
        self
    }

    pub fn i32(&mut self, value: i32) -> &mut Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn f32(&mut self, value: f32) -> &mut Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn i64(&mut self, value: i64) -> &mut Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn bool_aligned(&mut self, value: bool) -> &mut Self {
        self.data.push(value as u8);
        self.align()
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        self.u32(value.len() as u32);
        self.data.extend_from_slice(value.as_bytes());
        self.align()
    }

    pub fn byte_array(&mut self, value: &[u8]) -> &mut Self {
        self.u32(value.len() as u32);
        self.data.extend_from_slice(value);
        self.align()
    }

    pub fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.data)
    }
}

pub fn texture_body(
    name: &str,
    width: i32,
    height: i32,
    format: i32,
    payload: &[u8],
    stream_path: &str,
) -> Vec<u8> {
    ObjectWriter::new()
        .string(name)
        .i32(width)
        .i32(height)
        .i32(format)
        .bool_aligned(false)
        .byte_array(payload)
        .u32(0)
        .u32(0)
        .string(stream_path)
        .finish()
}

pub fn sprite_body(name: &str, rect: [f32; 4], is_polygon: bool, texture: (i32, i64)) -> Vec<u8> {
    ObjectWriter::new()
        .string(name)
        .f32(rect[0])
        .f32(rect[1])
        .f32(rect[2])
        .f32(rect[3])
        .bool_aligned(is_polygon)
        .i32(texture.0)
        .i64(texture.1)
        .finish()
}

/// A solid-color DXT1 payload for a `width` x `height` texture
pub fn solid_dxt1(width: u32, height: u32, rgb565: u16) -> Vec<u8> {
    let blocks = width.div_ceil(4) * height.div_ceil(4);
    let mut block = rgb565.to_le_bytes().to_vec();
    block.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
    block.repeat(blocks as usize)
}

pub struct TestObject {
    pub path_id: i64,
    pub type_id: i32,
    pub class_id: i16,
    pub data: Vec<u8>,
}

/// Builds complete UnityFS containers in memory
pub struct BundleBuilder {
    types: Vec<Vec<u8>>,
    objects: Vec<TestObject>,
    lz4_directory: bool,
    lz4_data: bool,
    format: u32,
    externals: u32,
}

impl Default for BundleBuilder {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            objects: Vec::new(),
            lz4_directory: true,
            lz4_data: false,
            format: 17,
            externals: 0,
        }
    }
}

impl BundleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, class_id: i32, spec: &[NodeSpec]) -> Self {
        self.types.push(type_tree_block(class_id, spec));
        self
    }

    pub fn with_object(mut self, path_id: i64, class_id: i32, data: Vec<u8>) -> Self {
        self.objects.push(TestObject {
            path_id,
            type_id: class_id,
            class_id: class_id as i16,
            data,
        });
        self
    }

    pub fn stored_directory(mut self) -> Self {
        self.lz4_directory = false;
        self
    }

    pub fn compressed_data(mut self) -> Self {
        self.lz4_data = true;
        self
    }

    pub fn serialized_format(mut self, format: u32) -> Self {
        self.format = format;
        self
    }

    pub fn externals(mut self, count: u32) -> Self {
        self.externals = count;
        self
    }

    /// The serialized file carried in the assets stream
    pub fn serialized_file(&self) -> Vec<u8> {
        let mut metadata = Vec::new();
        metadata.extend_from_slice(b"5.6.0f3\0");
        metadata.extend_from_slice(&5u32.to_le_bytes());
        metadata.push(1);
        metadata.extend_from_slice(&(self.types.len() as i32).to_le_bytes());
        for block in &self.types {
            metadata.extend_from_slice(block);
        }

        let mut body = Vec::new();
        let mut records = Vec::new();
        for object in &self.objects {
            while body.len() % 8 != 0 {
                body.push(0);
            }
            records.extend_from_slice(&[0, 0, 0]);
            records.extend_from_slice(&(object.path_id as i32).to_le_bytes());
            records.extend_from_slice(&((object.path_id >> 32) as i32).to_le_bytes());
            records.extend_from_slice(&(body.len() as u32).to_le_bytes());
            records.extend_from_slice(&(object.data.len() as u32).to_le_bytes());
            records.extend_from_slice(&object.type_id.to_le_bytes());
            records.extend_from_slice(&object.class_id.to_le_bytes());
            records.extend_from_slice(&0i16.to_le_bytes());
            records.push(0);
            body.extend_from_slice(&object.data);
        }

        metadata.extend_from_slice(&(self.objects.len() as u32).to_le_bytes());
        metadata.extend(records);
        metadata.extend_from_slice(&0u32.to_le_bytes());
        metadata.extend_from_slice(&self.externals.to_le_bytes());
        metadata.push(0);

        let header_size = 20;
        let data_offset = (header_size + metadata.len()).div_ceil(16) * 16;
        let file_size = data_offset + body.len();

        let mut file = Vec::with_capacity(file_size);
        file.extend_from_slice(&(metadata.len() as u32).to_be_bytes());
        file.extend_from_slice(&(file_size as u32).to_be_bytes());
        file.extend_from_slice(&self.format.to_be_bytes());
        file.extend_from_slice(&(data_offset as u32).to_be_bytes());
        file.extend_from_slice(&[0, 0, 0, 0]);
        file.extend(metadata);
        file.resize(data_offset, 0);
        file.extend(body);
        file
    }

    pub fn build(&self) -> Vec<u8> {
        let serialized = self.serialized_file();
        let (assets, block_flags) = if self.lz4_data {
            (lz4_flex::block::compress(&serialized), 2u16)
        } else {
            (serialized.clone(), 0u16)
        };

        let mut directory = vec![0u8; 16];
        directory.extend_from_slice(&1i32.to_be_bytes());
        directory.extend_from_slice(&(serialized.len() as u32).to_be_bytes());
        directory.extend_from_slice(&(assets.len() as u32).to_be_bytes());
        directory.extend_from_slice(&block_flags.to_be_bytes());
        directory.extend_from_slice(&1i32.to_be_bytes());
        directory.extend_from_slice(&0i32.to_be_bytes());
        directory.extend_from_slice(&0i32.to_be_bytes());
        directory.extend_from_slice(&(serialized.len() as i32).to_be_bytes());
        directory.extend_from_slice(&0i32.to_be_bytes());
        directory.extend_from_slice(&4i32.to_be_bytes());
        directory.extend_from_slice(b"CAB-test\0");

        let (directory_blob, flags) = if self.lz4_directory {
            (lz4_flex::block::compress(&directory), 0x42u32)
        } else {
            (directory.clone(), 0x40u32)
        };

        let mut bundle = Vec::new();
        bundle.extend_from_slice(b"UnityFS\0");
        bundle.extend_from_slice(&6i32.to_be_bytes());
        bundle.extend_from_slice(b"5.x.x\0");
        bundle.extend_from_slice(b"5.6.0f3\0");
        let size_offset = bundle.len();
        bundle.extend_from_slice(&0i32.to_be_bytes());
        bundle.extend_from_slice(&0i32.to_be_bytes());
        bundle.extend_from_slice(&(directory_blob.len() as u32).to_be_bytes());
        bundle.extend_from_slice(&(directory.len() as u32).to_be_bytes());
        bundle.extend_from_slice(&flags.to_be_bytes());
        bundle.extend(directory_blob);
        bundle.extend(assets);

        let total = bundle.len() as i32;
        bundle[size_offset + 4..size_offset + 8].copy_from_slice(&total.to_be_bytes());
        bundle
    }
}

/// A bundle with one DXT1 texture and the given sprites
pub fn atlas_bundle(width: u32, height: u32, sprites: &[(&str, [f32; 4])]) -> Vec<u8> {
    let mut builder = BundleBuilder::new()
        .with_type(TEXTURE2D_CLASS, &texture2d_tree())
        .with_type(SPRITE_CLASS, &sprite_tree())
        .with_object(
            1,
            TEXTURE2D_CLASS,
            texture_body("atlas", width as i32, height as i32, 10, &solid_dxt1(width, height, 0xF800), ""),
        );
    for (index, (name, rect)) in sprites.iter().enumerate() {
        builder = builder.with_object(
            10 + index as i64,
            SPRITE_CLASS,
            sprite_body(name, *rect, false, (0, 1)),
        );
    }
    builder.build()
}
