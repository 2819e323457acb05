//! Image decoding with configured limits and the texture handed to the view.

use crate::config::ImageLimits;
use anyhow::Context as _;
use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use image::{GenericImageView, ImageReader, Limits};
use std::io::{BufRead, Cursor, Read, Seek};
use std::path::Path;

/// Decoded image uploaded as a texture. `size` is the original pixel size.
pub struct LoadedImage {
    pub size: [usize; 2],
    pub texture: TextureHandle,
}

impl LoadedImage {
    pub fn from_color_image(ctx: &Context, pixels: ColorImage) -> Self {
        let size = pixels.size;
        let texture = ctx.load_texture("loaded_image", pixels, TextureOptions::LINEAR);
        Self { size, texture }
    }
}

fn decode_reader_to_color<R>(
    limits: &ImageLimits,
    mut reader: ImageReader<R>,
) -> anyhow::Result<ColorImage>
where
    R: Read + Seek + BufRead,
{
    let il = limits.sanitized();
    let mut decode_limits = Limits::default();
    decode_limits.max_image_width = Some(il.image_dim);
    decode_limits.max_image_height = Some(il.image_dim);
    decode_limits.max_alloc = Some(il.alloc_bytes);
    reader.limits(decode_limits);
    let img = reader.decode().context("Failed to decode image data")?;

    let (w, h) = img.dimensions();
    let total_pixels = u64::from(w) * u64::from(h);
    if total_pixels > il.total_pixels {
        anyhow::bail!(
            "Image too large: {}x{} (~{} MP) exceeds limit (~{} MP)",
            w,
            h,
            total_pixels / 1_000_000,
            il.total_pixels / 1_000_000
        );
    }

    let rgba = img.to_rgba8();
    Ok(ColorImage::from_rgba_unmultiplied(
        [w as usize, h as usize],
        &rgba,
    ))
}

/// Load and decode an image from a filesystem path.
pub fn decode_image_from_path(limits: &ImageLimits, path: &Path) -> anyhow::Result<ColorImage> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .with_guessed_format()
        .context("Failed to detect image format")?;
    decode_reader_to_color(limits, reader)
}

/// Decode dropped bytes, guessing the format from their content.
pub fn decode_image_from_bytes(limits: &ImageLimits, bytes: Vec<u8>) -> anyhow::Result<ColorImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("Failed to detect image format")?;
    decode_reader_to_color(limits, reader)
}
