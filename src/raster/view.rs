//! Borrowed image handles.
//!
//! These carry the same shape metadata as [`Image`](crate::Image) but alias a caller-owned
//! byte region. The zero-copy RAW attach path hands them out so that pre-loaded blobs can be
//! processed without copying, and the pre-allocated blend interface writes through
//! [`ImageViewMut`].
use crate::foundation::error::{CsapError, CsapResult};
use crate::raster::buffer::{Image, byte_len, pixel_index};

/// Read-only view over pixel bytes owned elsewhere.
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    height: u32,
    width: u32,
    channels: u8,
}

impl<'a> ImageView<'a> {
    /// Borrow `data` as a `height x width x channels` image. The slice length must match exactly.
    pub fn new(data: &'a [u8], height: u32, width: u32, channels: u8) -> CsapResult<Self> {
        check_len(data.len(), height, width, channels)?;
        Ok(Self::from_parts(data, height, width, channels))
    }

    pub(crate) fn from_parts(data: &'a [u8], height: u32, width: u32, channels: u8) -> Self {
        Self {
            data,
            height,
            width,
            channels,
        }
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

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    pub fn sample(&self, y: u32, x: u32, c: u8) -> u8 {
        self.data[pixel_index(self.width, self.channels, y, x, c)]
    }

    /// `(height, width)` equality.
    pub fn same_dims(&self, other: &ImageView<'_>) -> bool {
        self.height == other.height && self.width == other.width
    }

    /// Copy the borrowed bytes into an owned [`Image`].
    pub fn to_image(&self) -> CsapResult<Image> {
        let mut data = crate::raster::buffer::try_alloc_zeroed(self.data.len())?;
        data.copy_from_slice(self.data);
        Image::new(self.height, self.width, self.channels, data)
    }
}

/// Mutable view over pixel bytes owned elsewhere.
#[derive(Debug)]
pub struct ImageViewMut<'a> {
    data: &'a mut [u8],
    height: u32,
    width: u32,
    channels: u8,
}

impl<'a> ImageViewMut<'a> {
    pub fn new(data: &'a mut [u8], height: u32, width: u32, channels: u8) -> CsapResult<Self> {
        check_len(data.len(), height, width, channels)?;
        Ok(Self::from_parts(data, height, width, channels))
    }

    pub(crate) fn from_parts(data: &'a mut [u8], height: u32, width: u32, channels: u8) -> Self {
        Self {
            data,
            height,
            width,
            channels,
        }
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

    pub fn data(&self) -> &[u8] {
        self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data
    }

    /// Address of the first sample; used to verify zero-copy placement.
    pub fn data_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    pub fn as_view(&self) -> ImageView<'_> {
        ImageView::from_parts(self.data, self.height, self.width, self.channels)
    }
}

fn check_len(len: usize, height: u32, width: u32, channels: u8) -> CsapResult<()> {
    let expected = byte_len(height, width, channels)?;
    if len != expected {
        return Err(CsapError::invalid_argument(format!(
            "view over {len} bytes cannot hold {height}x{width}x{channels} ({expected} bytes)"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/view.rs"]
mod tests;
