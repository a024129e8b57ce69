//! Encode requests.

use alloc::vec::Vec;

use enough::Stop;

use crate::bmp::{self, BmpVariant};
use crate::error::BmpError;
use crate::pixel::PixelGrid;

/// Encode request builder.
///
/// Output is always bottom-up and uncompressed. Nothing is produced unless
/// the grid passes [`PixelGrid::is_valid`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest {
    variant: BmpVariant,
}

impl EncodeRequest {
    pub fn new(variant: BmpVariant) -> Self {
        Self { variant }
    }

    /// 24-bit BGR.
    pub fn truecolor() -> Self {
        Self::new(BmpVariant::Truecolor)
    }

    /// 1-bit with a black/white palette.
    pub fn monochrome() -> Self {
        Self::new(BmpVariant::Monochrome)
    }

    pub fn variant(&self) -> BmpVariant {
        self.variant
    }

    pub fn encode(&self, grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
        bmp::encode(grid, self.variant, &stop)
    }
}
