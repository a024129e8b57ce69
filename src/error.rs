//! Hard errors and soft decode warnings.

use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding and encoding.
///
/// Every variant is a hard failure: the operation stops and no grid or
/// output bytes are produced. Recoverable oddities are reported as
/// [`DecodeWarning`]s instead.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("cannot read BMP source: {0}")]
    SourceUnavailable(String),

    #[error("missing BM signature")]
    BadMagic,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("cannot write BMP sink: {0}")]
    SinkUnavailable(String),

    #[error("pixel grid is not a valid image")]
    InvalidGrid,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}

/// Non-fatal problems found while decoding.
///
/// Decoding continues after a warning using the configured layout, so the
/// resulting grid is a best-effort interpretation of the file.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeWarning {
    #[error("unsupported bit depth {found} (decoding as {expected}-bit)")]
    UnsupportedDepth { found: u16, expected: u16 },

    #[error("compression type {0} is not supported (reading as uncompressed)")]
    Compressed(u32),

    #[error("palette entry {index} has non-zero reserved byte {reserved}")]
    BadPalette { index: usize, reserved: u8 },

    /// Pixel data for a foreign depth was shorter than the configured layout
    /// needs. The missing bytes were read as zero.
    #[error("pixel data is {available} bytes, {expected} needed (rest filled with zero)")]
    ShortPixelData { expected: usize, available: usize },
}
