//! Pre-allocated blend interface for hosts that keep images at fixed memory locations.
//!
//! Nothing here allocates. Inputs are borrowed straight out of CSAP RAW regions, the result is
//! written into a caller-owned region, and failures come back as small negative status codes
//! (see [`CsapError::status_code`]) instead of errors.
use crate::blend::packed::{overlay_packed_into, require_overlay};
use crate::blend::{BlendMode, FixedAlpha, check_inputs};
use crate::codec::memory::{OutputRegion, attach_raw};
use crate::foundation::error::{CsapError, CsapResult};
use crate::raster::view::{ImageView, ImageViewMut};

/// Status offset for a failure while attaching the first input.
pub const PHASE_INPUT1: i32 = 0x10;
/// Status offset for a failure while attaching the second input.
pub const PHASE_INPUT2: i32 = 0x20;
/// Status offset for a failure inside the blend itself.
pub const PHASE_BLEND: i32 = 0x30;
/// Status offset for a failure while writing the output header.
pub const PHASE_DETACH: i32 = 0x40;

/// Packed-lane overlay of `fg` onto `bg`, written into `out`.
///
/// Checks run in a fixed order: mode (only overlay), input channels, input dimensions, then
/// the output shape, which must be BGRA with the input dimensions.
pub fn blend_into(
    out: &mut ImageViewMut<'_>,
    bg: ImageView<'_>,
    fg: ImageView<'_>,
    mode: BlendMode,
    alpha: FixedAlpha,
) -> CsapResult<()> {
    require_overlay(mode)?;
    check_inputs(&bg, &fg)?;
    if out.channels() != 4 || out.height() != bg.height() || out.width() != bg.width() {
        return Err(CsapError::invalid_output(format!(
            "output is {}x{}x{}, blend needs {}x{}x4",
            out.height(),
            out.width(),
            out.channels(),
            bg.height(),
            bg.width()
        )));
    }
    overlay_packed_into(out.data_mut(), bg.data(), fg.data(), alpha);
    Ok(())
}

/// [`blend_into`] reporting `0` on success or the negative status code of the failure.
pub fn blend_into_status(
    out: &mut ImageViewMut<'_>,
    bg: ImageView<'_>,
    fg: ImageView<'_>,
    mode: BlendMode,
    alpha: FixedAlpha,
) -> i32 {
    match blend_into(out, bg, fg, mode, alpha) {
        Ok(()) => 0,
        Err(e) => e.status_code(),
    }
}

/// Blend two RAW regions into a third, returning a host exit status.
///
/// `0` means success. Otherwise the value is `phase - code`, where `phase` is one of the
/// `PHASE_*` offsets and `code` is the negative status of the failing step, e.g. `0x32` for a
/// blend input with the wrong channel count.
#[tracing::instrument(skip(input1, input2, output), fields(out_len = output.len()))]
pub fn run_embedded_blend(
    input1: &[u8],
    input2: &[u8],
    output: &mut [u8],
    mode: BlendMode,
    alpha: FixedAlpha,
) -> i32 {
    let bg = match attach_raw(input1) {
        Ok(v) => v,
        Err(e) => return fail(PHASE_INPUT1, &e),
    };
    let fg = match attach_raw(input2) {
        Ok(v) => v,
        Err(e) => return fail(PHASE_INPUT2, &e),
    };
    if let Err(e) = require_overlay(mode).and_then(|()| check_inputs(&bg, &fg)) {
        return fail(PHASE_BLEND, &e);
    }
    let (region, mut view) = match OutputRegion::new(output, bg.height(), bg.width(), 4) {
        Ok(parts) => parts,
        Err(_) => {
            let e = CsapError::invalid_output("output region cannot hold the blended image");
            return fail(PHASE_BLEND, &e);
        }
    };
    if let Err(e) = blend_into(&mut view, bg, fg, mode, alpha) {
        return fail(PHASE_BLEND, &e);
    }
    match region.detach(&view) {
        Ok(_) => 0,
        Err(e) => fail(PHASE_DETACH, &e),
    }
}

fn fail(phase: i32, err: &CsapError) -> i32 {
    tracing::debug!(phase, error = %err, "embedded blend failed");
    phase - err.status_code()
}

#[cfg(test)]
#[path = "../../tests/unit/blend/embedded.rs"]
mod tests;
