use crate::bmp::{BmpVariant, FileHeader, InfoHeader};
use crate::error::BmpError;

/// Image metadata read from the headers alone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    pub width: u32,
    /// Row count, regardless of storage direction.
    pub height: u32,
    /// Rows are stored top row first (negative height field).
    pub top_down: bool,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// `None` when the declared depth is neither 1 nor 24.
    pub variant: Option<BmpVariant>,
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
}

impl ImageInfo {
    /// Probe BMP headers without decoding pixels.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        crate::bmp::probe(data)
    }
}
