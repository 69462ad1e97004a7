use crate::foundation::error::{CsapError, CsapResult};
use crate::raster::buffer::byte_len;

/// Size of the fixed CSAP RAW header in bytes.
pub const HEADER_LEN: usize = 16;

/// Container magic, stored as the ASCII bytes `CSAP`.
pub const MAGIC: [u8; 4] = *b"CSAP";

/// Pixel layout declared by the format tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// `BGR-`: three channels.
    Bgr,
    /// `BGRA`: four channels.
    Bgra,
}

impl PixelFormat {
    pub const fn tag(self) -> [u8; 4] {
        match self {
            Self::Bgr => *b"BGR-",
            Self::Bgra => *b"BGRA",
        }
    }

    pub fn from_tag(tag: [u8; 4]) -> CsapResult<Self> {
        match &tag {
            b"BGR-" => Ok(Self::Bgr),
            b"BGRA" => Ok(Self::Bgra),
            _ => Err(CsapError::invalid_format(format!(
                "unknown format tag {:08x}",
                u32::from_be_bytes(tag)
            ))),
        }
    }

    pub const fn channels(self) -> u8 {
        match self {
            Self::Bgr => 3,
            Self::Bgra => 4,
        }
    }

    pub fn from_channels(channels: u8) -> CsapResult<Self> {
        match channels {
            3 => Ok(Self::Bgr),
            4 => Ok(Self::Bgra),
            n => Err(CsapError::invalid_format(format!(
                "CSAP RAW stores 3 or 4 channels, not {n}"
            ))),
        }
    }
}

/// Decoded 16-byte container header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawHeader {
    pub format: PixelFormat,
    pub height: u32,
    pub width: u32,
}

impl RawHeader {
    pub fn new(format: PixelFormat, height: u32, width: u32) -> Self {
        Self {
            format,
            height,
            width,
        }
    }

    /// Header describing an image of the given shape; rejects channel counts other than 3 or 4.
    pub fn for_shape(height: u32, width: u32, channels: u8) -> CsapResult<Self> {
        Ok(Self::new(PixelFormat::from_channels(channels)?, height, width))
    }

    pub fn channels(&self) -> u8 {
        self.format.channels()
    }

    /// Number of pixel bytes following the header.
    pub fn payload_len(&self) -> CsapResult<usize> {
        byte_len(self.height, self.width, self.channels())
    }

    /// Parse the leading [`HEADER_LEN`] bytes of `bytes`.
    ///
    /// Height and width are little-endian. Values that would be negative as a signed 32-bit
    /// integer are rejected, matching readers that store the dimensions in an `int`.
    pub fn parse(bytes: &[u8]) -> CsapResult<Self> {
        let Some(head) = bytes.get(..HEADER_LEN) else {
            return Err(CsapError::truncated(HEADER_LEN, bytes.len()));
        };
        let magic = word(head, 0);
        if magic != MAGIC {
            return Err(CsapError::InvalidMagic { found: magic });
        }
        let format = PixelFormat::from_tag(word(head, 4))?;
        let height = u32::from_le_bytes(word(head, 8));
        let width = u32::from_le_bytes(word(head, 12));
        if i32::try_from(height).is_err() || i32::try_from(width).is_err() {
            return Err(CsapError::invalid_format(format!(
                "negative dimensions in header ({} x {})",
                height as i32, width as i32
            )));
        }
        Ok(Self::new(format, height, width))
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&MAGIC);
        out[4..8].copy_from_slice(&self.format.tag());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..16].copy_from_slice(&self.width.to_le_bytes());
        out
    }
}

fn word(head: &[u8], at: usize) -> [u8; 4] {
    [head[at], head[at + 1], head[at + 2], head[at + 3]]
}

#[cfg(test)]
#[path = "../../tests/unit/codec/header.rs"]
mod tests;
