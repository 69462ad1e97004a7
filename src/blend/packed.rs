//! Overlay blend on packed [`Vrgb`] lanes.
//!
//! Each pixel is unpacked once, both weights are broadcast into all three lanes, and the
//! color math runs as two lane-parallel multiplies and one add. Only overlay is expressible
//! this way because merge needs per-channel premultiplication by two different alphas.
use crate::blend::fixed::combined_alpha;
use crate::blend::{BlendMode, FixedAlpha, check_inputs};
use crate::foundation::error::{CsapError, CsapResult};
use crate::packed::vrgb::{Vrgb, argb_from_bgra, bgra_from_argb};
use crate::raster::buffer::Image;
use crate::raster::view::ImageView;

/// Packed-lane overlay. Any other mode is rejected with [`CsapError::InvalidArgument`].
#[tracing::instrument(skip(bg, fg), fields(h = bg.height(), w = bg.width()))]
pub fn blend_vector(
    bg: ImageView<'_>,
    fg: ImageView<'_>,
    mode: BlendMode,
    alpha: FixedAlpha,
) -> CsapResult<Image> {
    require_overlay(mode)?;
    check_inputs(&bg, &fg)?;
    let mut out = Image::try_zeroed(bg.height(), bg.width(), 4)?;
    overlay_packed_into(out.data_mut(), bg.data(), fg.data(), alpha);
    Ok(out)
}

pub(crate) fn require_overlay(mode: BlendMode) -> CsapResult<()> {
    if mode != BlendMode::Overlay {
        return Err(CsapError::invalid_argument(format!(
            "packed-lane blend only supports overlay, got {mode}"
        )));
    }
    Ok(())
}

pub(crate) fn overlay_packed_into(out: &mut [u8], bg: &[u8], fg: &[u8], alpha: FixedAlpha) {
    for ((o, b), f) in out
        .chunks_exact_mut(4)
        .zip(bg.chunks_exact(4))
        .zip(fg.chunks_exact(4))
    {
        let b = [b[0], b[1], b[2], b[3]];
        let f = [f[0], f[1], f[2], f[3]];
        o.copy_from_slice(&overlay_pixel(b, f, alpha));
    }
}

/// Overlay one BGRA pixel.
#[inline]
pub fn overlay_pixel(bg: [u8; 4], fg: [u8; 4], alpha: FixedAlpha) -> [u8; 4] {
    let ac = combined_alpha(fg[3], alpha);
    let vb = Vrgb::unpack(argb_from_bgra(bg));
    let vf = Vrgb::unpack(argb_from_bgra(fg));
    let blended = vb * Vrgb::broadcast(256 - ac) + vf * Vrgb::broadcast(ac);
    bgra_from_argb(blended.pack(bg[3]))
}

#[cfg(test)]
#[path = "../../tests/unit/blend/packed.rs"]
mod tests;
