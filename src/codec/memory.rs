//! Zero-copy access to CSAP RAW blobs that already live in memory.
//!
//! Hosts that preload images at fixed addresses hand the codec a byte region holding a full
//! container (header followed by samples). Attaching borrows the samples at `blob[16..]`
//! without copying; the borrow checker guarantees the view does not outlive the region.
//!
//! Output goes through [`OutputRegion`]: the region is split into its header slot and a
//! writable payload view. Once an engine has filled the view, [`OutputRegion::detach`] writes
//! the header, but only if the view it is given still points at `blob + 16`.
use crate::codec::header::{HEADER_LEN, RawHeader};
use crate::foundation::error::{CsapError, CsapResult};
use crate::raster::buffer::byte_len;
use crate::raster::view::{ImageView, ImageViewMut};

/// Borrow the samples of an in-memory RAW blob as an image view.
pub fn attach_raw(blob: &[u8]) -> CsapResult<ImageView<'_>> {
    let header = RawHeader::parse(blob)?;
    let len = header.payload_len()?;
    let payload = payload_slice(blob.len(), len)?;
    Ok(ImageView::from_parts(
        &blob[payload],
        header.height,
        header.width,
        header.channels(),
    ))
}

/// Mutable variant of [`attach_raw`] for in-place processing.
pub fn attach_raw_mut(blob: &mut [u8]) -> CsapResult<ImageViewMut<'_>> {
    let header = RawHeader::parse(blob)?;
    let len = header.payload_len()?;
    let payload = payload_slice(blob.len(), len)?;
    Ok(ImageViewMut::from_parts(
        &mut blob[payload],
        header.height,
        header.width,
        header.channels(),
    ))
}

/// Header slot of a caller-owned output region, paired with the payload handed out by
/// [`OutputRegion::new`].
#[derive(Debug)]
pub struct OutputRegion<'a> {
    header: &'a mut [u8],
    payload_addr: usize,
}

impl<'a> OutputRegion<'a> {
    /// Split `blob` into a header slot and an exactly-sized payload view for an image of the
    /// declared shape. The header bytes are left untouched until [`OutputRegion::detach`].
    pub fn new(
        blob: &'a mut [u8],
        height: u32,
        width: u32,
        channels: u8,
    ) -> CsapResult<(Self, ImageViewMut<'a>)> {
        let len = byte_len(height, width, channels)?;
        if blob.len() < HEADER_LEN + len {
            return Err(CsapError::truncated(HEADER_LEN + len, blob.len()));
        }
        let (header, rest) = blob.split_at_mut(HEADER_LEN);
        let payload = &mut rest[..len];
        let region = Self {
            header,
            payload_addr: payload.as_ptr() as usize,
        };
        let view = ImageViewMut::from_parts(payload, height, width, channels);
        Ok((region, view))
    }

    /// Write the container header for `img` into the region.
    ///
    /// Fails with [`CsapError::ZeroCopyMisalignment`] when `img` does not start at
    /// `blob + 16`; the header is not modified in that case.
    pub fn detach(self, img: &ImageViewMut<'_>) -> CsapResult<RawHeader> {
        if img.data_ptr() as usize != self.payload_addr {
            return Err(CsapError::ZeroCopyMisalignment);
        }
        let header = RawHeader::for_shape(img.height(), img.width(), img.channels())?;
        self.header.copy_from_slice(&header.to_bytes());
        tracing::debug!(?header, "detached raw output region");
        Ok(header)
    }
}

fn payload_slice(blob_len: usize, len: usize) -> CsapResult<std::ops::Range<usize>> {
    let end = HEADER_LEN + len;
    if blob_len < end {
        return Err(CsapError::truncated(end, blob_len));
    }
    Ok(HEADER_LEN..end)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/memory.rs"]
mod tests;
