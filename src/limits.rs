//! Decode resource limits.

use core::mem::size_of;

use alloc::vec::Vec;

use crate::error::BmpError;
use crate::pixel::Pixel;

/// Resource limits applied to a decode before any pixel row is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes held by the decoded grid.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check decoded grid geometry against every configured limit.
    pub(crate) fn check_grid(&self, width: u32, height: u32) -> Result<(), BmpError> {
        let exceeded = |what: &str, value: u64, max: u64| {
            BmpError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {max}"))
        };

        if let Some(max) = self.max_width.filter(|&m| u64::from(width) > m) {
            return Err(exceeded("width", width.into(), max));
        }
        if let Some(max) = self.max_height.filter(|&m| u64::from(height) > m) {
            return Err(exceeded("height", height.into(), max));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max) = self.max_pixels.filter(|&m| pixels > m) {
            return Err(exceeded("pixel count", pixels, max));
        }
        if let Some(max) = self.max_memory_bytes {
            let bytes = grid_bytes(width, height);
            if bytes > max {
                return Err(exceeded("grid allocation of bytes", bytes, max));
            }
        }
        Ok(())
    }
}

/// Heap footprint of a `width` x `height` grid: one `Vec` per row plus the pixels.
fn grid_bytes(width: u32, height: u32) -> u64 {
    let row_overhead = size_of::<Vec<Pixel>>() as u64;
    let pixel = size_of::<Pixel>() as u64;
    u64::from(height).saturating_mul(row_overhead.saturating_add(pixel.saturating_mul(width.into())))
}
