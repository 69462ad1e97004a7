use crate::blend::{BlendMode, FixedAlpha, check_inputs};
use crate::foundation::error::CsapResult;
use crate::raster::buffer::Image;
use crate::raster::view::ImageView;

/// Scalar Q8 blend.
///
/// - merge color: `(bg.c·bg.a·(256−α) + fg.c·fg.a·α) >> 16`
/// - merge alpha: `(bg.a·(256−α) + fg.a·α) >> 8`
/// - overlay: `αc = (fg.a·α) >> 8`, `(bg.c·(256−αc) + fg.c·αc) >> 8`, alpha from `bg`
#[tracing::instrument(skip(bg, fg), fields(h = bg.height(), w = bg.width()))]
pub fn blend_int(
    bg: ImageView<'_>,
    fg: ImageView<'_>,
    mode: BlendMode,
    alpha: FixedAlpha,
) -> CsapResult<Image> {
    check_inputs(&bg, &fg)?;
    let mut out = Image::try_zeroed(bg.height(), bg.width(), 4)?;
    let px = match mode {
        BlendMode::Merge => merge_px,
        BlendMode::Overlay => overlay_px,
    };
    for ((o, b), f) in out
        .data_mut()
        .chunks_exact_mut(4)
        .zip(bg.data().chunks_exact(4))
        .zip(fg.data().chunks_exact(4))
    {
        o.copy_from_slice(&px(b, f, alpha));
    }
    Ok(out)
}

fn merge_px(bg: &[u8], fg: &[u8], alpha: FixedAlpha) -> [u8; 4] {
    let a = u32::from(alpha.get());
    let ia = u32::from(alpha.complement());
    let (ba, fa) = (u32::from(bg[3]), u32::from(fg[3]));
    let mut out = [0u8; 4];
    for c in 0..3 {
        out[c] = ((u32::from(bg[c]) * ba * ia + u32::from(fg[c]) * fa * a) >> 16) as u8;
    }
    out[3] = ((ba * ia + fa * a) >> 8) as u8;
    out
}

fn overlay_px(bg: &[u8], fg: &[u8], alpha: FixedAlpha) -> [u8; 4] {
    let ac = combined_alpha(fg[3], alpha);
    let iac = 256 - ac;
    let mut out = [0u8; 4];
    for c in 0..3 {
        out[c] = ((u32::from(bg[c]) * iac + u32::from(fg[c]) * ac) >> 8) as u8;
    }
    out[3] = bg[3];
    out
}

/// `(fg.a · α) >> 8`, always in `0..=255`.
#[inline]
pub(crate) fn combined_alpha(fg_alpha: u8, alpha: FixedAlpha) -> u32 {
    (u32::from(fg_alpha) * u32::from(alpha.get())) >> 8
}

#[cfg(test)]
#[path = "../../tests/unit/blend/fixed.rs"]
mod tests;
