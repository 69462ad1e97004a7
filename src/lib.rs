//! Offline image processing on CSAP RAW containers.
//!
//! The crate reads 8-bit BGR/BGRA images from a 16-byte-header container, applies a box blur
//! or an alpha blend of two images, and writes the result back in the same format.
//!
//! # Numeric variants
//!
//! Every operation has a double-precision reference and a Q8 fixed-point variant that only
//! uses integer shifts and multiplies, so results are reproducible on integer-only hardware.
//! The overlay blend additionally has a packed-lane variant that holds the three color
//! channels of a pixel in one `u32` ([`Vrgb`]) and blends them with lane-parallel arithmetic.
//!
//! # Pipeline
//!
//! 1. **Decode**: [`read_raw_image`] / [`attach_raw`] (zero-copy) or [`load_image`] for PNG/JPEG/BMP
//! 2. **Process**: [`create_blur_engine`] or [`create_blend_engine`] for the chosen [`Precision`]
//! 3. **Encode**: [`write_raw_image`], or [`OutputRegion::detach`] for pre-allocated regions
//!
//! Engines are pure functions: every call allocates a fresh output, except for the
//! pre-allocated [`blend_into`] / [`run_embedded_blend`] interface.
#![forbid(unsafe_code)]

mod blend;
mod blur;
mod codec;
mod foundation;
mod naming;
mod packed;
mod raster;

pub use blend::embedded::{
    PHASE_BLEND, PHASE_DETACH, PHASE_INPUT1, PHASE_INPUT2, blend_into, blend_into_status,
    run_embedded_blend,
};
pub use blend::packed::overlay_pixel;
pub use blend::{
    BlendAlpha, BlendEngine, BlendMode, FixedAlpha, FloatBlend, IntBlend, VectorBlend,
    blend_float, blend_int, blend_vector, create_blend_engine,
};
pub use blur::engine::{BlurEngine, FloatBlur, IntBlur, blur_float, blur_int, create_blur_engine};
pub use blur::kernel::{FixedKernel, KernelSize};
pub use codec::file::{
    decode_raw, encode_raw, read_raw_from, read_raw_image, write_raw_image, write_raw_to,
};
pub use codec::header::{HEADER_LEN, MAGIC, PixelFormat, RawHeader};
pub use codec::interchange::{dynamic_to_raw, is_raw_file, load_image, raw_to_dynamic, save_image};
pub use codec::memory::{OutputRegion, attach_raw, attach_raw_mut};
pub use foundation::core::Precision;
pub use foundation::error::{CsapError, CsapResult};
pub use naming::{
    RAW_EXTENSION, blend_output_path, blur_output_path, convert_output_path, explicit_raw_output,
    format_alpha,
};
pub use packed::vrgb::{
    Argb, B_MASK, G_MASK, LANES_MASK, R_MASK, Vrgb, argb_from_bgra, bgra_from_argb,
};
pub use raster::buffer::{Image, byte_len};
pub use raster::view::{ImageView, ImageViewMut};
