use crate::blur::kernel::{FixedKernel, KernelSize};
use crate::foundation::core::Precision;
use crate::foundation::error::{CsapError, CsapResult};
use crate::raster::buffer::Image;
use crate::raster::view::ImageView;

/// Box blur with a floating-point mean, truncated toward zero on store.
///
/// The output shrinks by `N - 1` on both axes; no border extension is applied. Every channel,
/// alpha included, is filtered independently.
///
/// The mean is one division of the exact window sum, so a constant image stays constant. A
/// per-tap `Σ v · (1/N²)` accumulation truncates some of those means to `v - 1`; output can
/// therefore differ by one from blurs computed that way.
#[tracing::instrument(skip(src), fields(h = src.height(), w = src.width(), c = src.channels()))]
pub fn blur_float(src: ImageView<'_>, kernel: KernelSize) -> CsapResult<Image> {
    let mut out = prepare_output(&src, kernel)?;
    let taps = f64::from(kernel.taps());
    convolve(&src, &mut out, kernel, |window| {
        let sum: u32 = window.iter().map(|&(_, v)| u32::from(v)).sum();
        (f64::from(sum) / taps) as u8
    });
    Ok(out)
}

/// Box blur in Q8 fixed point: `Σ sample · tap >> 8` with taps from [`FixedKernel`].
#[tracing::instrument(skip(src), fields(h = src.height(), w = src.width(), c = src.channels()))]
pub fn blur_int(src: ImageView<'_>, kernel: KernelSize) -> CsapResult<Image> {
    let mut out = prepare_output(&src, kernel)?;
    let fixed = FixedKernel::new(kernel);
    let taps = fixed.taps();
    convolve(&src, &mut out, kernel, |window| {
        let acc: i32 = window
            .iter()
            .map(|&(t, v)| i32::from(v) * taps[t])
            .sum();
        (acc >> 8) as u8
    });
    Ok(out)
}

/// A blur implementation selected at runtime.
pub trait BlurEngine {
    /// Short name used in logs and output file names.
    fn name(&self) -> &'static str;

    fn blur(&self, src: ImageView<'_>, kernel: KernelSize) -> CsapResult<Image>;
}

/// Floating-point reference blur.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatBlur;

/// Fixed-point integer blur.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntBlur;

impl BlurEngine for FloatBlur {
    fn name(&self) -> &'static str {
        "float"
    }

    fn blur(&self, src: ImageView<'_>, kernel: KernelSize) -> CsapResult<Image> {
        blur_float(src, kernel)
    }
}

impl BlurEngine for IntBlur {
    fn name(&self) -> &'static str {
        "int"
    }

    fn blur(&self, src: ImageView<'_>, kernel: KernelSize) -> CsapResult<Image> {
        blur_int(src, kernel)
    }
}

/// Create the blur engine for `precision`. There is no packed-lane blur.
pub fn create_blur_engine(precision: Precision) -> CsapResult<Box<dyn BlurEngine>> {
    match precision {
        Precision::Float => Ok(Box::new(FloatBlur)),
        Precision::Int => Ok(Box::new(IntBlur)),
        Precision::Vector => Err(CsapError::invalid_argument(
            "vector precision is only available for overlay blending",
        )),
    }
}

fn prepare_output(src: &ImageView<'_>, kernel: KernelSize) -> CsapResult<Image> {
    let channels = src.channels();
    if channels != 3 && channels != 4 {
        return Err(CsapError::channel_mismatch("blur", "3 or 4", channels));
    }
    let n = kernel.n();
    if src.height() < n || src.width() < n {
        return Err(CsapError::invalid_argument(format!(
            "{}x{} image is smaller than the {kernel} kernel",
            src.height(),
            src.width()
        )));
    }
    Image::try_zeroed(src.height() - n + 1, src.width() - n + 1, channels)
}

/// Visit every output sample, handing `reduce` the `(tap index, input sample)` pairs of its
/// N x N window in row-major tap order.
fn convolve<F>(src: &ImageView<'_>, out: &mut Image, kernel: KernelSize, mut reduce: F)
where
    F: FnMut(&[(usize, u8)]) -> u8,
{
    let n = kernel.n();
    let mut window = Vec::with_capacity(kernel.taps() as usize);
    for c in 0..out.channels() {
        for y in 0..out.height() {
            for x in 0..out.width() {
                window.clear();
                for ky in 0..n {
                    for kx in 0..n {
                        let t = (ky * n + kx) as usize;
                        window.push((t, src.sample(y + ky, x + kx, c)));
                    }
                }
                out.set_sample(y, x, c, reduce(&window));
            }
        }
    }
    tracing::debug!(
        out_h = out.height(),
        out_w = out.width(),
        "box blur complete"
    );
}

#[cfg(test)]
#[path = "../../tests/unit/blur/engine.rs"]
mod tests;
