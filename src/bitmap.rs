//! Stateful image handle (`std` feature): open, inspect, replace, save.

use std::path::Path;

use enough::Unstoppable;

use crate::bmp::BmpVariant;
use crate::error::BmpError;
use crate::io::{decode_file, encode_file};
use crate::pixel::PixelGrid;

/// An owned image plus the BMP layout it is read and written with.
///
/// The grid is never validated on assignment; [`Bitmap::save`] refuses to
/// write an invalid one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitmap {
    pixels: PixelGrid,
    variant: BmpVariant,
}

impl Bitmap {
    pub fn new(variant: BmpVariant) -> Self {
        Self {
            pixels: PixelGrid::new(),
            variant,
        }
    }

    pub fn variant(&self) -> BmpVariant {
        self.variant
    }

    /// Replace the contents with the BMP at `path`, read with this handle's layout.
    ///
    /// On failure the handle is left empty and the error is returned.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), BmpError> {
        self.pixels = PixelGrid::new();
        let decoded = decode_file(path, Some(self.variant), Unstoppable)?;
        self.pixels = decoded.grid;
        Ok(())
    }

    /// Write the current image. Fails without touching `path` if the image is invalid.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BmpError> {
        encode_file(&self.pixels, self.variant, path, Unstoppable)
    }

    pub fn is_image(&self) -> bool {
        self.pixels.is_valid()
    }

    /// Snapshot of the current image, or an empty grid if it is not valid.
    pub fn to_pixel_grid(&self) -> PixelGrid {
        if self.is_image() {
            self.pixels.clone()
        } else {
            PixelGrid::new()
        }
    }

    /// Overwrite the current image. No validation happens here.
    pub fn set_pixel_grid(&mut self, grid: PixelGrid) {
        self.pixels = grid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    #[test]
    fn snapshot_of_invalid_image_is_empty() {
        let mut bitmap = Bitmap::new(BmpVariant::Truecolor);
        bitmap.set_pixel_grid(PixelGrid::from_rows(std::vec![
            std::vec![Pixel::BLACK; 2],
            std::vec![Pixel::BLACK],
        ]));
        assert!(!bitmap.is_image());
        assert!(bitmap.to_pixel_grid().is_empty());
    }

    #[test]
    fn save_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stripes.bmp");
        let grid = PixelGrid::from_fn(5, 4, |row, _| Pixel::mono(row % 2 == 0));

        let mut bitmap = Bitmap::new(BmpVariant::Monochrome);
        bitmap.set_pixel_grid(grid.clone());
        bitmap.save(&path).unwrap();

        let mut reopened = Bitmap::new(BmpVariant::Monochrome);
        reopened.open(&path).unwrap();
        assert_eq!(reopened.to_pixel_grid(), grid);
    }

    #[test]
    fn failed_open_clears_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut bitmap = Bitmap::new(BmpVariant::Truecolor);
        bitmap.set_pixel_grid(PixelGrid::from_fn(1, 1, |_, _| Pixel::WHITE));
        assert!(bitmap.open(dir.path().join("missing.bmp")).is_err());
        assert!(!bitmap.is_image());
    }
}
