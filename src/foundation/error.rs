/// Convenience result type used across the crate.
pub type CsapResult<T> = Result<T, CsapError>;

/// Top-level error taxonomy used by codec and engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum CsapError {
    /// Bad variant, mode, alpha, kernel size, or buffer shape supplied by the caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The container did not start with `CSAP`.
    #[error("invalid magic: {found:02x?} (expected \"CSAP\")")]
    InvalidMagic {
        /// First four bytes of the rejected blob.
        found: [u8; 4],
    },

    /// Unknown format tag, or a channel count the container cannot express.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Fewer bytes were available than the header declares.
    #[error("truncated data: expected {expected} bytes, got {actual}")]
    TruncatedData {
        /// Bytes required.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// Underlying filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Two images that must agree in `(height, width)` do not.
    #[error("dimension mismatch: {left_h}x{left_w} vs {right_h}x{right_w}")]
    DimensionMismatch {
        /// Height of the first image.
        left_h: u32,
        /// Width of the first image.
        left_w: u32,
        /// Height of the second image.
        right_h: u32,
        /// Width of the second image.
        right_w: u32,
    },

    /// An engine was handed an image with an unsupported channel count.
    #[error("channel mismatch: {context} requires {expected} channels, got {actual}")]
    ChannelMismatch {
        /// Operation that rejected the image.
        context: &'static str,
        /// Human readable description of the accepted counts.
        expected: &'static str,
        /// Channel count actually found.
        actual: u8,
    },

    /// The output pixel buffer could not be obtained.
    #[error("allocation failure: could not reserve {bytes} bytes")]
    AllocationFailure {
        /// Requested size.
        bytes: usize,
    },

    /// A caller-supplied output buffer does not fit the result.
    #[error("invalid output: {0}")]
    InvalidOutput(String),

    /// A zero-copy detach found the image data no longer lives at `blob + 16`.
    #[error("zero-copy misalignment: image data does not start at region offset 16")]
    ZeroCopyMisalignment,

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CsapError {
    /// Build a [`CsapError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`CsapError::InvalidFormat`] value.
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    /// Build a [`CsapError::InvalidOutput`] value.
    pub fn invalid_output(msg: impl Into<String>) -> Self {
        Self::InvalidOutput(msg.into())
    }

    /// Build a [`CsapError::TruncatedData`] value.
    pub fn truncated(expected: usize, actual: usize) -> Self {
        Self::TruncatedData { expected, actual }
    }

    /// Build a [`CsapError::ChannelMismatch`] value.
    pub fn channel_mismatch(context: &'static str, expected: &'static str, actual: u8) -> Self {
        Self::ChannelMismatch {
            context,
            expected,
            actual,
        }
    }

    /// Negative status code used by the pre-allocated embedded interface.
    ///
    /// | code | meaning |
    /// |---|---|
    /// | -1 | invalid mode or argument |
    /// | -2 | wrong channel count, or bad magic in a RAW region |
    /// | -3 | output region missing/undersized, or bad format tag |
    /// | -4 | zero-copy misalignment |
    /// | -5 | dimension mismatch |
    /// | -6 | any other failure |
    pub fn status_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => -1,
            Self::ChannelMismatch { .. } | Self::InvalidMagic { .. } => -2,
            Self::InvalidOutput(_)
            | Self::InvalidFormat(_)
            | Self::TruncatedData { .. }
            | Self::AllocationFailure { .. } => -3,
            Self::ZeroCopyMisalignment => -4,
            Self::DimensionMismatch { .. } => -5,
            Self::Io(_) | Self::Other(_) => -6,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
