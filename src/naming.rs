//! Output file names for the `csap` drivers.
//!
//! Without `--output`, results land next to the (first) input and the name records how they
//! were produced, e.g. `img/cat_5x5_int.raw` or `img/cat_dog_overlay_0.5_float.raw`.
use std::path::{Path, PathBuf};

use crate::blend::BlendMode;
use crate::blur::kernel::KernelSize;
use crate::foundation::core::Precision;

/// Extension used for CSAP RAW files.
pub const RAW_EXTENSION: &str = "raw";

/// `OUT` → `OUT.raw`, unless the name already ends in `.raw`.
pub fn explicit_raw_output(out: &Path) -> PathBuf {
    if out.extension().is_some_and(|e| e == RAW_EXTENSION) {
        return out.to_path_buf();
    }
    let mut s = out.as_os_str().to_owned();
    s.push(".");
    s.push(RAW_EXTENSION);
    PathBuf::from(s)
}

/// `<dir>/<stem>_<kernel>_<type>.raw`
pub fn blur_output_path(input: &Path, kernel: KernelSize, precision: Precision) -> PathBuf {
    let name = format!("{}_{kernel}_{precision}.{RAW_EXTENSION}", stem(input));
    dir(input).join(name)
}

/// `<dir1>/<stem1>_<stem2>_<mode>_<alpha>_<type>.raw`
pub fn blend_output_path(
    input1: &Path,
    input2: &Path,
    mode: BlendMode,
    alpha: f64,
    precision: Precision,
) -> PathBuf {
    let name = format!(
        "{}_{}_{mode}_{}_{precision}.{RAW_EXTENSION}",
        stem(input1),
        stem(input2),
        format_alpha(alpha)
    );
    dir(input1).join(name)
}

/// Default target for `convert`: same directory and stem, extension `raw` or `png`.
pub fn convert_output_path(input: &Path, to_raw: bool) -> PathBuf {
    let ext = if to_raw { RAW_EXTENSION } else { "png" };
    dir(input).join(format!("{}.{ext}", stem(input)))
}

/// Render `alpha` with at most two significant digits and no trailing zeros, the way
/// C's `%.2g` does: `0.5`, `0.25`, `0.33`, `1`, `0`, `1e-05`.
pub fn format_alpha(alpha: f64) -> String {
    if alpha == 0.0 || !alpha.is_finite() {
        return format!("{alpha}");
    }
    let exp = alpha.abs().log10().floor() as i32;
    // Rounding to two digits can carry into the next decade (0.999 -> 1).
    let rounded = format!("{:.1e}", alpha);
    let (mantissa, e) = rounded.split_once('e').unwrap_or((rounded.as_str(), "0"));
    let exp = e.parse::<i32>().unwrap_or(exp);
    if !(-4..2).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs());
    }
    let decimals = (1 - exp).max(0) as usize;
    trim_zeros(&format!("{alpha:.decimals$}")).to_owned()
}

fn trim_zeros(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
#[path = "../tests/unit/naming.rs"]
mod tests;
