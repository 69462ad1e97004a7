//! CSAP RAW container codec.
//!
//! ```text
//! offset  size  field
//!      0     4  magic "CSAP"
//!      4     4  format tag "BGR-" (3 channels) or "BGRA" (4 channels)
//!      8     4  height, little-endian, non-negative as i32
//!     12     4  width,  little-endian, non-negative as i32
//!     16   h*w*c samples, row-major, channel-interleaved
//! ```
pub mod file;
pub mod header;
pub mod interchange;
pub mod memory;
