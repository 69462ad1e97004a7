//! Alpha compositing of two equally sized BGRA images.
//!
//! Two modes exist:
//!
//! - **merge**: premultiplied convex combination of background and foreground, including alpha.
//! - **overlay**: foreground alpha scaled by the blend factor, composited over the background;
//!   background alpha is preserved.
//!
//! Three numeric realizations are provided: a double-precision reference ([`blend_float`]),
//! scalar Q8 fixed point ([`blend_int`]) and a packed-lane variant of the fixed-point overlay
//! ([`blend_vector`]) built on [`Vrgb`](crate::Vrgb). The packed variant rounds its products and
//! may differ from the scalar one by one LSB per channel.

pub mod embedded;
pub mod fixed;
pub mod float;
pub mod packed;

use std::{fmt, str::FromStr};

use crate::foundation::core::Precision;
use crate::foundation::error::{CsapError, CsapResult};
use crate::raster::buffer::Image;
use crate::raster::view::ImageView;

pub use fixed::blend_int;
pub use float::blend_float;
pub use packed::blend_vector;

/// Blending mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Merge,
    Overlay,
}

impl BlendMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Overlay => "overlay",
        }
    }

    /// Numeric mode used by embedded hosts: 0 = merge, 1 = overlay.
    pub fn from_code(code: i32) -> CsapResult<Self> {
        match code {
            0 => Ok(Self::Merge),
            1 => Ok(Self::Overlay),
            n => Err(CsapError::invalid_argument(format!("unknown blend mode {n}"))),
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlendMode {
    type Err = CsapError;

    fn from_str(s: &str) -> CsapResult<Self> {
        match s {
            "merge" => Ok(Self::Merge),
            "overlay" => Ok(Self::Overlay),
            other => Err(CsapError::invalid_argument(format!(
                "unknown blend mode '{other}' (expected overlay or merge)"
            ))),
        }
    }
}

/// Blend factor in Q8: 0 selects the background, 256 the foreground.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedAlpha(u16);

impl FixedAlpha {
    pub const MAX: u16 = 256;

    pub fn new(alpha: u16) -> CsapResult<Self> {
        if alpha > Self::MAX {
            return Err(CsapError::invalid_argument(format!(
                "fixed-point alpha must be in 0..=256, got {alpha}"
            )));
        }
        Ok(Self(alpha))
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    /// `256 - alpha`.
    pub const fn complement(self) -> u16 {
        Self::MAX - self.0
    }
}

/// User-facing blend factor in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct BlendAlpha(f64);

impl BlendAlpha {
    pub fn new(alpha: f64) -> CsapResult<Self> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(CsapError::invalid_argument(format!(
                "alpha must be between 0.0 and 1.0, got {alpha}"
            )));
        }
        Ok(Self(alpha))
    }

    pub const fn get(self) -> f64 {
        self.0
    }

    /// Fixed-point factor handed to the integer engines.
    ///
    /// The scale is 255, not 256: 1.0 maps to 255 and the integer path never reaches a pure
    /// foreground.
    pub fn to_fixed(self) -> FixedAlpha {
        FixedAlpha((self.0 * 255.0) as u16)
    }
}

/// A blend implementation selected at runtime.
pub trait BlendEngine {
    /// Short name used in logs and output file names.
    fn name(&self) -> &'static str;

    fn blend(
        &self,
        bg: ImageView<'_>,
        fg: ImageView<'_>,
        mode: BlendMode,
        alpha: BlendAlpha,
    ) -> CsapResult<Image>;
}

/// Double-precision reference compositor.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatBlend;

/// Scalar fixed-point compositor.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntBlend;

/// Packed-lane fixed-point compositor (overlay only).
#[derive(Clone, Copy, Debug, Default)]
pub struct VectorBlend;

impl BlendEngine for FloatBlend {
    fn name(&self) -> &'static str {
        "float"
    }

    fn blend(
        &self,
        bg: ImageView<'_>,
        fg: ImageView<'_>,
        mode: BlendMode,
        alpha: BlendAlpha,
    ) -> CsapResult<Image> {
        blend_float(bg, fg, mode, alpha.get())
    }
}

impl BlendEngine for IntBlend {
    fn name(&self) -> &'static str {
        "int"
    }

    fn blend(
        &self,
        bg: ImageView<'_>,
        fg: ImageView<'_>,
        mode: BlendMode,
        alpha: BlendAlpha,
    ) -> CsapResult<Image> {
        blend_int(bg, fg, mode, alpha.to_fixed())
    }
}

impl BlendEngine for VectorBlend {
    fn name(&self) -> &'static str {
        "vector"
    }

    fn blend(
        &self,
        bg: ImageView<'_>,
        fg: ImageView<'_>,
        mode: BlendMode,
        alpha: BlendAlpha,
    ) -> CsapResult<Image> {
        blend_vector(bg, fg, mode, alpha.to_fixed())
    }
}

/// Create the blend engine for `precision`.
pub fn create_blend_engine(precision: Precision) -> Box<dyn BlendEngine> {
    match precision {
        Precision::Float => Box::new(FloatBlend),
        Precision::Int => Box::new(IntBlend),
        Precision::Vector => Box::new(VectorBlend),
    }
}

/// Both inputs must be BGRA and agree in `(height, width)`.
pub(crate) fn check_inputs(bg: &ImageView<'_>, fg: &ImageView<'_>) -> CsapResult<()> {
    for img in [bg, fg] {
        if img.channels() != 4 {
            return Err(CsapError::channel_mismatch("blend", "4", img.channels()));
        }
    }
    if !bg.same_dims(fg) {
        return Err(CsapError::DimensionMismatch {
            left_h: bg.height(),
            left_w: bg.width(),
            right_h: fg.height(),
            right_w: fg.width(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/blend/mod.rs"]
mod tests;
