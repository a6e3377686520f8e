//! UnityFS envelope processing
//!
//! The envelope is a big-endian header, the compressed directory blob, and
//! the assets stream that holds the serialized file.
//!
//! - `header` - envelope header parsing
//! - `directory` - block list and file node parsing
//!
//! # Examples
//!
//! ```rust,no_run
//! use unityfs_binary::bundle::AssetBundle;
//! use unityfs_binary::DecodeOptions;
//!
//! let data = std::fs::read("icon.sd")?;
//! let bundle = AssetBundle::parse(&data, &DecodeOptions::default())?;
//! println!("{} bytes of assets", bundle.assets().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod directory;
pub mod header;

pub use directory::{Directory, DirectoryNode};
pub use header::{BundleHeader, UNITY_FS_SIGNATURE};

use crate::compression::{Decompressor, Lz4Decompressor, decompress};
use crate::error::{BinaryError, Result};
use crate::options::DecodeOptions;
use crate::reader::{BinaryReader, ByteOrder};
use std::borrow::Cow;
use tracing::debug;

/// A parsed UnityFS container borrowing the input buffer
#[derive(Debug, Clone)]
pub struct AssetBundle<'a> {
    /// Envelope header
    pub header: BundleHeader,
    /// Directory, when requested and decodable
    pub directory: Option<Directory>,
    compressed_directory: &'a [u8],
    assets: Cow<'a, [u8]>,
}

impl<'a> AssetBundle<'a> {
    /// Parse a container with the default LZ4 decompressor
    pub fn parse(data: &'a [u8], options: &DecodeOptions) -> Result<Self> {
        Self::parse_with_decompressor(data, options, &Lz4Decompressor)
    }

    /// Parse a container with a caller-supplied block decompressor
    pub fn parse_with_decompressor(
        data: &'a [u8],
        options: &DecodeOptions,
        decompressor: &dyn Decompressor,
    ) -> Result<Self> {
        let mut reader = BinaryReader::new(data, ByteOrder::Big);
        let header = BundleHeader::from_reader(&mut reader)?;

        let compressed_directory =
            reader.read_slice(header.compressed_blocks_info_size as usize)?;
        let raw_assets = reader.remaining_slice();

        let mut bundle = Self {
            header,
            directory: None,
            compressed_directory,
            assets: Cow::Borrowed(raw_assets),
        };

        if options.decode_directory {
            let directory = bundle.decode_directory(decompressor)?;
            if directory.has_compressed_blocks() {
                bundle.assets = Cow::Owned(rebuild_assets(&directory, raw_assets, decompressor)?);
            }
            bundle.directory = Some(directory);
        }

        Ok(bundle)
    }

    /// Decompress and parse the directory blob
    pub fn decode_directory(&self, decompressor: &dyn Decompressor) -> Result<Directory> {
        let data = decompress(
            self.compressed_directory,
            self.header.compression_type()?,
            self.header.uncompressed_blocks_info_size as usize,
            decompressor,
        )?;
        Directory::parse(&data)
    }

    /// The compressed directory blob as stored in the envelope
    pub fn compressed_directory(&self) -> &[u8] {
        self.compressed_directory
    }

    /// The assets stream holding the serialized file
    pub fn assets(&self) -> &[u8] {
        &self.assets
    }
}

/// Concatenate the decompressed data blocks
fn rebuild_assets(
    directory: &Directory,
    raw: &[u8],
    decompressor: &dyn Decompressor,
) -> Result<Vec<u8>> {
    let mut reader = BinaryReader::new(raw, ByteOrder::Big);
    let total: usize = directory
        .blocks
        .iter()
        .map(|block| block.uncompressed_size as usize)
        .sum();
    let mut output = Vec::with_capacity(total.min(raw.len().saturating_mul(8)));

    for (index, block) in directory.blocks.iter().enumerate() {
        let compressed = reader.read_slice(block.compressed_size as usize)?;
        let data = block.decompress(compressed, decompressor).map_err(|e| match e {
            BinaryError::Unsupported(msg) => {
                BinaryError::unsupported(format!("data block {}: {}", index, msg))
            }
            other => other,
        })?;
        output.extend_from_slice(&data);
    }

    debug!(
        "Rebuilt assets stream from {} blocks ({} bytes)",
        directory.blocks.len(),
        output.len()
    );
    Ok(output)
}
