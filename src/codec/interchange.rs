//! Conversion between CSAP RAW images and conventional formats (PNG, JPEG, BMP).
//!
//! RAW samples are BGR(A); the `image` crate works in RGB(A), so both directions swap the
//! first and third channel of every pixel.
use std::{fs::File, io::Read, path::Path};

use anyhow::Context as _;
use image::{DynamicImage, RgbImage, RgbaImage};

use crate::codec::header::MAGIC;
use crate::foundation::error::{CsapError, CsapResult};
use crate::raster::buffer::Image;
use crate::raster::view::ImageView;

/// Convert a 3- or 4-channel RAW image into an RGB8 / RGBA8 [`DynamicImage`].
pub fn raw_to_dynamic(img: ImageView<'_>) -> CsapResult<DynamicImage> {
    let mut data = img.data().to_vec();
    swap_red_blue(&mut data, usize::from(img.channels()));
    let (w, h) = (img.width(), img.height());
    let out = match img.channels() {
        3 => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        n => {
            return Err(CsapError::channel_mismatch("png export", "3 or 4", n));
        }
    };
    out.ok_or_else(|| CsapError::invalid_argument("pixel buffer does not match image size"))
}

/// Convert any decoded image into RAW layout: BGRA when it carries alpha, BGR otherwise.
pub fn dynamic_to_raw(img: &DynamicImage) -> CsapResult<Image> {
    let (channels, mut data, w, h) = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        (4u8, rgba.into_raw(), w, h)
    } else {
        let rgb = img.to_rgb8();
        let (w, h) = rgb.dimensions();
        (3u8, rgb.into_raw(), w, h)
    };
    swap_red_blue(&mut data, usize::from(channels));
    Image::new(h, w, channels, data)
}

/// Decode a PNG/JPEG/BMP file into a RAW-layout image.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_image(path: &Path) -> CsapResult<Image> {
    let dyn_img = image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    dynamic_to_raw(&dyn_img)
}

/// Encode `img` to `path`; the output format follows the file extension.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn save_image(path: &Path, img: &Image) -> CsapResult<()> {
    let dyn_img = raw_to_dynamic(img.view())?;
    dyn_img
        .save(path)
        .with_context(|| format!("encode image '{}'", path.display()))?;
    Ok(())
}

/// Whether the file at `path` starts with the CSAP magic.
pub fn is_raw_file(path: &Path) -> CsapResult<bool> {
    let mut f = File::open(path)?;
    let mut magic = [0u8; 4];
    match f.read_exact(&mut magic) {
        Ok(()) => Ok(magic == MAGIC),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn swap_red_blue(data: &mut [u8], channels: usize) {
    if channels < 3 {
        return;
    }
    for px in data.chunks_exact_mut(channels) {
        px.swap(0, 2);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/interchange.rs"]
mod tests;
