use crate::foundation::error::{CsapError, CsapResult};
use crate::raster::view::{ImageView, ImageViewMut};

/// Owned 8-bit image: row-major, pixel-interleaved samples in B, G, R[, A] order.
///
/// Dimensions are fixed at construction; the pixel bytes can be mutated in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    height: u32,
    width: u32,
    channels: u8,
}

impl Image {
    /// Wrap an existing pixel buffer. `data.len()` must equal `height * width * channels`.
    pub fn new(height: u32, width: u32, channels: u8, data: Vec<u8>) -> CsapResult<Self> {
        let expected = byte_len(height, width, channels)?;
        if data.len() != expected {
            return Err(CsapError::invalid_argument(format!(
                "pixel buffer holds {} bytes, {height}x{width}x{channels} needs {expected}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            height,
            width,
            channels,
        })
    }

    /// Allocate a zero-filled image, reporting allocation failure instead of aborting.
    pub fn try_zeroed(height: u32, width: u32, channels: u8) -> CsapResult<Self> {
        let len = byte_len(height, width, channels)?;
        let data = try_alloc_zeroed(len)?;
        Ok(Self {
            data,
            height,
            width,
            channels,
        })
    }

    /// Image filled with one repeated pixel value.
    pub fn filled(height: u32, width: u32, pixel: &[u8]) -> CsapResult<Self> {
        let channels = u8::try_from(pixel.len())
            .map_err(|_| CsapError::invalid_argument("pixel has too many channels"))?;
        let mut img = Self::try_zeroed(height, width, channels)?;
        if channels > 0 {
            for px in img.data.chunks_exact_mut(pixel.len()) {
                px.copy_from_slice(pixel);
            }
        }
        Ok(img)
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Raw sample bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable sample bytes. The length cannot change through this handle.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Give up ownership of the pixel buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Sample at `(y, x, c)`. Panics when out of range, like slice indexing.
    #[inline]
    pub fn sample(&self, y: u32, x: u32, c: u8) -> u8 {
        self.data[self.index(y, x, c)]
    }

    #[inline]
    pub fn set_sample(&mut self, y: u32, x: u32, c: u8, v: u8) {
        let i = self.index(y, x, c);
        self.data[i] = v;
    }

    /// Byte offset of `(y, x, c)`: `((y * width) + x) * channels + c`.
    #[inline]
    pub fn index(&self, y: u32, x: u32, c: u8) -> usize {
        pixel_index(self.width, self.channels, y, x, c)
    }

    pub fn view(&self) -> ImageView<'_> {
        ImageView::from_parts(&self.data, self.height, self.width, self.channels)
    }

    pub fn view_mut(&mut self) -> ImageViewMut<'_> {
        ImageViewMut::from_parts(&mut self.data, self.height, self.width, self.channels)
    }
}

/// Number of sample bytes for an image of the given shape.
pub fn byte_len(height: u32, width: u32, channels: u8) -> CsapResult<usize> {
    (height as usize)
        .checked_mul(width as usize)
        .and_then(|v| v.checked_mul(usize::from(channels)))
        .ok_or_else(|| {
            CsapError::invalid_argument(format!(
                "image size overflow for {height}x{width}x{channels}"
            ))
        })
}

#[inline]
pub(crate) fn pixel_index(width: u32, channels: u8, y: u32, x: u32, c: u8) -> usize {
    ((y as usize) * (width as usize) + (x as usize)) * usize::from(channels) + usize::from(c)
}

pub(crate) fn try_alloc_zeroed(len: usize) -> CsapResult<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| CsapError::AllocationFailure { bytes: len })?;
    data.resize(len, 0);
    Ok(data)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
