//! UnityFS Asset Decoder CLI
//!
//! Command-line interface for extracting images from UnityFS bundles and
//! inspecting their contents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use unityfs_asset::{DecodeOptions, decode_objects, extract_images};

#[derive(Parser)]
#[command(name = "unityfs-asset")]
#[command(about = "Decode Unity UnityFS asset bundles into PNG images")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the bundle image and its sprites as PNG files
    Extract {
        /// Input bundle path
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Skip sprite extraction
        #[arg(long)]
        no_sprites: bool,
    },

    /// Print the envelope, directory and decoded objects
    Inspect {
        /// Input bundle path
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Extract {
            input,
            output,
            no_sprites,
        } => extract_command(&input, &output, no_sprites),
        Commands::Inspect { input } => inspect_command(&input),
    }
}

fn read_bundle(input: &Path) -> Result<Vec<u8>> {
    let data = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    debug!("Read {} bytes from {}", data.len(), input.display());
    Ok(data)
}

fn extract_command(input: &Path, output: &Path, no_sprites: bool) -> Result<()> {
    let data = read_bundle(input)?;
    let options = DecodeOptions {
        extract_sprites: !no_sprites,
        ..DecodeOptions::default()
    };

    let decoded = decode_objects(&data, &options)
        .with_context(|| format!("Failed to decode {}", input.display()))?;
    let Some(image) = extract_images(&decoded, &options)? else {
        println!("no image");
        return Ok(());
    };

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let image_path = write_png(output, &image.image_name, &image.image_bitmap)?;
    println!(
        "✓ {} ({}x{})",
        image_path.display(),
        image.image_bitmap.width(),
        image.image_bitmap.height()
    );

    for sprite in &image.sprites {
        let sprite_path = write_png(output, &sprite.sprite_name, &sprite.sprite_bitmap)?;
        println!(
            "  ✓ {} ({}x{})",
            sprite_path.display(),
            sprite.sprite_bitmap.width(),
            sprite.sprite_bitmap.height()
        );
    }

    Ok(())
}

fn write_png(dir: &Path, name: &str, bitmap: &RgbaImage) -> Result<PathBuf> {
    let path = dir.join(format!("{}.png", file_stem(name)));
    bitmap
        .save_with_format(&path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Object names may hold path separators; keep the file inside the output dir
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || stem == "." || stem == ".." {
        "unnamed".to_string()
    } else {
        stem
    }
}

fn inspect_command(input: &Path) -> Result<()> {
    let data = read_bundle(input)?;
    let decoded = decode_objects(&data, &DecodeOptions::default())
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    let header = &decoded.header;
    println!("Bundle: {}", input.display());
    println!("  Signature: {} v{}", header.signature, header.format_version);
    println!("  Unity version: {}", header.unity_version);
    println!("  Generator: {}", header.generator_version);
    println!("  Flags: {:#x}", header.flags);

    if let Some(directory) = &decoded.directory {
        println!("  Blocks: {}", directory.blocks.len());
        for block in &directory.blocks {
            println!(
                "    {} -> {} bytes (flags {:#x})",
                block.compressed_size, block.uncompressed_size, block.flags
            );
        }
        println!("  Nodes: {}", directory.nodes.len());
        for node in &directory.nodes {
            println!("    {} @ {} ({} bytes)", node.name, node.offset, node.size);
        }
    }

    let metadata = &decoded.metadata;
    println!(
        "Serialized file: format {}, {} type trees, {} objects",
        metadata.header.format,
        metadata.types.len(),
        metadata.objects.len()
    );

    println!("Decoded objects: {}", decoded.objects.len());
    for object in &decoded.objects {
        let fields = object
            .value
            .as_record()
            .map(|record| record.keys().map(String::as_str).collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        println!(
            "  {:>20} {:<16} {}",
            object.path_id, object.type_name, fields
        );
    }

    Ok(())
}
