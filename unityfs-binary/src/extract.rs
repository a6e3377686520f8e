//! End-to-end bundle decoding
//!
//! Envelope, directory, metadata, type trees, objects, then the texture and
//! sprite stages. The whole pipeline works on one in-memory buffer and
//! returns owned structures.
//!
//! # Examples
//!
//! ```rust,no_run
//! use unityfs_binary::decode_bundle;
//!
//! let data = std::fs::read("icon.sd")?;
//! match decode_bundle(&data)? {
//!     Some(image) => println!(
//!         "{} ({}x{}), {} sprites",
//!         image.image_name,
//!         image.image_bitmap.width(),
//!         image.image_bitmap.height(),
//!         image.sprites.len()
//!     ),
//!     None => println!("no image"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::asset::{AssetMetadata, AssetMetadataReader};
use crate::bundle::{AssetBundle, BundleHeader, Directory};
use crate::compression::{Decompressor, Lz4Decompressor};
use crate::error::Result;
use crate::object::{DecodedObject, ObjectDecoder};
use crate::options::DecodeOptions;
use crate::sprite::{SPRITE_TYPE, Sprite, SpriteImage, SpriteProcessor};
use crate::texture::{TEXTURE2D_TYPE, Texture2D, decode_texture};
use crate::typetree::{TypeTree, TypeTreeBuilder};
use image::RgbaImage;
use tracing::{debug, info, warn};

/// Everything decoded from a bundle before the image stages
#[derive(Debug, Clone)]
pub struct DecodedBundle {
    pub header: BundleHeader,
    pub directory: Option<Directory>,
    pub metadata: AssetMetadata,
    /// Decoded objects in object directory order
    pub objects: Vec<DecodedObject>,
}

impl DecodedBundle {
    /// Objects whose root type is `type_name`
    pub fn objects_of_type<'a>(
        &'a self,
        type_name: &'a str,
    ) -> impl Iterator<Item = &'a DecodedObject> + 'a {
        self.objects
            .iter()
            .filter(move |object| object.type_name == type_name)
    }
}

/// The image carried by a bundle and the sprites cut from it
#[derive(Debug, Clone, PartialEq)]
pub struct BundleImage {
    pub image_name: String,
    pub image_bitmap: RgbaImage,
    pub sprites: Vec<SpriteImage>,
}

/// Decode the object graph of a bundle
pub fn decode_objects(data: &[u8], options: &DecodeOptions) -> Result<DecodedBundle> {
    decode_objects_with_decompressor(data, options, &Lz4Decompressor)
}

/// Decode the object graph of a bundle with a custom block decompressor
pub fn decode_objects_with_decompressor(
    data: &[u8],
    options: &DecodeOptions,
    decompressor: &dyn Decompressor,
) -> Result<DecodedBundle> {
    let bundle = AssetBundle::parse_with_decompressor(data, options, decompressor)?;
    let metadata = AssetMetadataReader::parse(bundle.assets())?;

    let trees = metadata
        .types
        .iter()
        .map(TypeTreeBuilder::build)
        .collect::<Result<Vec<TypeTree>>>()?;
    debug!("Built {} type trees", trees.len());

    let objects = ObjectDecoder::new(&trees, options).decode_all(&metadata, bundle.assets())?;

    Ok(DecodedBundle {
        header: bundle.header,
        directory: bundle.directory,
        metadata,
        objects,
    })
}

/// Decode a bundle into its image with default options
///
/// Returns `Ok(None)` when the bundle holds no decodable texture.
pub fn decode_bundle(data: &[u8]) -> Result<Option<BundleImage>> {
    decode_bundle_with_options(data, &DecodeOptions::default())
}

/// Decode a bundle into its image
pub fn decode_bundle_with_options(
    data: &[u8],
    options: &DecodeOptions,
) -> Result<Option<BundleImage>> {
    let decoded = decode_objects(data, options)?;
    extract_images(&decoded, options)
}

/// Run the texture and sprite stages over decoded objects
///
/// Textures with unsupported formats or streamed payloads are skipped; the
/// last texture that decodes becomes the bundle image. Any sprite failure
/// aborts.
pub fn extract_images(
    decoded: &DecodedBundle,
    options: &DecodeOptions,
) -> Result<Option<BundleImage>> {
    let textures = decode_textures(decoded)?;
    let Some((primary, primary_image)) = textures.last() else {
        info!("Bundle contains no decodable texture");
        return Ok(None);
    };

    let mut sprites = Vec::new();
    if options.extract_sprites {
        for object in decoded.objects_of_type(SPRITE_TYPE) {
            let sprite = Sprite::from_object(object)?;
            let image = owning_texture(&sprite, &textures).unwrap_or(primary_image);
            sprites.push(SpriteProcessor::new(image).extract(&sprite)?);
        }
    }

    debug!(
        "Image '{}' {}x{} with {} sprites",
        primary.name,
        primary.width,
        primary.height,
        sprites.len()
    );

    Ok(Some(BundleImage {
        image_name: primary.name.clone(),
        image_bitmap: primary_image.clone(),
        sprites,
    }))
}

fn decode_textures(decoded: &DecodedBundle) -> Result<Vec<(Texture2D, RgbaImage)>> {
    let mut textures = Vec::new();
    for object in decoded.objects_of_type(TEXTURE2D_TYPE) {
        match decode_texture(object) {
            Ok(texture) => textures.push(texture),
            Err(e) if e.is_object_local() => {
                warn!("Skipping texture object {}: {}", object.path_id, e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(textures)
}

/// Texture a sprite's render data points at, when it is in this file
fn owning_texture<'a>(
    sprite: &Sprite,
    textures: &'a [(Texture2D, RgbaImage)],
) -> Option<&'a RgbaImage> {
    let reference = sprite.texture.filter(|r| r.is_local())?;
    textures
        .iter()
        .rev()
        .find(|(texture, _)| texture.object_id() == reference.object_id)
        .map(|(_, image)| image)
}
