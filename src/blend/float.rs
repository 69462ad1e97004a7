use crate::blend::{BlendMode, check_inputs};
use crate::foundation::error::{CsapError, CsapResult};
use crate::raster::buffer::Image;
use crate::raster::view::ImageView;

/// Double-precision reference blend. Samples are normalized to `[0, 1]`, combined, scaled back
/// by 255 and truncated toward zero.
#[tracing::instrument(skip(bg, fg), fields(h = bg.height(), w = bg.width()))]
pub fn blend_float(
    bg: ImageView<'_>,
    fg: ImageView<'_>,
    mode: BlendMode,
    alpha: f64,
) -> CsapResult<Image> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(CsapError::invalid_argument(format!(
            "alpha must be between 0.0 and 1.0, got {alpha}"
        )));
    }
    check_inputs(&bg, &fg)?;
    let mut out = Image::try_zeroed(bg.height(), bg.width(), 4)?;
    let px = match mode {
        BlendMode::Merge => merge,
        BlendMode::Overlay => overlay,
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

fn unit(v: u8) -> f64 {
    f64::from(v) / 255.0
}

fn store(v: f64) -> u8 {
    (v * 255.0) as u8
}

fn merge(bg: &[u8], fg: &[u8], alpha: f64) -> [u8; 4] {
    let (ba, fa) = (unit(bg[3]), unit(fg[3]));
    let mut out = [0u8; 4];
    for c in 0..3 {
        out[c] = store(unit(bg[c]) * ba * (1.0 - alpha) + unit(fg[c]) * fa * alpha);
    }
    out[3] = store(ba * (1.0 - alpha) + fa * alpha);
    out
}

fn overlay(bg: &[u8], fg: &[u8], alpha: f64) -> [u8; 4] {
    let ac = unit(fg[3]) * alpha;
    let mut out = [0u8; 4];
    for c in 0..3 {
        out[c] = store(unit(bg[c]) * (1.0 - ac) + unit(fg[c]) * ac);
    }
    out[3] = bg[3];
    out
}

#[cfg(test)]
#[path = "../../tests/unit/blend/float.rs"]
mod tests;
