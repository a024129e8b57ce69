//! BMP encoder: uncompressed 24-bit and 1-bit, always bottom-up.

use alloc::vec::Vec;

use enough::Stop;
use log::debug;

use super::header::{FileHeader, InfoHeader, PaletteEntry};
use super::utils::pack_bits;
use super::BmpVariant;
use crate::error::BmpError;
use crate::pixel::{Pixel, PixelGrid};

/// Encode a grid to a complete BMP file in memory.
///
/// The grid is validated before any output is produced.
pub(crate) fn encode_bmp(
    grid: &PixelGrid,
    variant: BmpVariant,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    if !grid.is_valid() {
        return Err(BmpError::InvalidGrid);
    }
    let w = grid.width();
    let h = grid.height();
    let too_large = || BmpError::DimensionsTooLarge {
        width: u32::try_from(w).unwrap_or(u32::MAX),
        height: u32::try_from(h).unwrap_or(u32::MAX),
    };
    let width = i32::try_from(w).map_err(|_| too_large())?;
    let height = i32::try_from(h).map_err(|_| too_large())?;

    let row_stride = variant.row_stride(w).ok_or_else(too_large)?;
    let bmp_offset = variant.pixel_data_offset();
    let file_size = row_stride
        .checked_mul(h)
        .and_then(|pixel_bytes| pixel_bytes.checked_add(bmp_offset as usize))
        .ok_or_else(too_large)?;

    stop.check()?;

    let mut out = Vec::with_capacity(file_size);
    FileHeader {
        file_size: u32::try_from(file_size).map_err(|_| too_large())?,
        reserved1: 0,
        reserved2: 0,
        bmp_offset,
    }
    .write(&mut out);
    InfoHeader::for_image(variant, width, height).write(&mut out);
    write_palette(&mut out, variant);

    for (row_idx, row) in grid.rows().iter().rev().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        match variant.bits_per_pixel() {
            24 => write_bgr_row(&mut out, row, row_stride),
            _ => pack_bits(row.iter().map(|p| p.high), row_stride, &mut out),
        }
    }

    debug!("encoded {w}x{h} {variant:?} BMP, {} bytes", out.len());
    Ok(out)
}

fn write_palette(out: &mut Vec<u8>, variant: BmpVariant) {
    let entries = [PaletteEntry::BLACK, PaletteEntry::WHITE];
    for entry in entries.iter().take(variant.palette_entries() as usize) {
        entry.write(out);
    }
}

fn write_bgr_row(out: &mut Vec<u8>, row: &[Pixel], row_stride: usize) {
    for p in row {
        out.extend_from_slice(&[p.blue, p.green, p.red]);
    }
    let pad_bytes = row_stride - row.len() * 3;
    out.extend(core::iter::repeat_n(0u8, pad_bytes));
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    #[test]
    fn truecolor_layout() {
        let grid = PixelGrid::from_rows(vec![vec![Pixel::rgb(1, 2, 3)], vec![Pixel::rgb(4, 5, 6)]]);
        let out = encode_bmp(&grid, BmpVariant::Truecolor, &Unstoppable).unwrap();
        assert_eq!(out.len(), 54 + 2 * 4);
        assert_eq!(&out[0..2], b"BM");
        assert_eq!(&out[2..6], &62u32.to_le_bytes());
        assert_eq!(&out[10..14], &54u32.to_le_bytes());
        assert_eq!(&out[28..30], &24u16.to_le_bytes());
        assert_eq!(&out[38..42], &2835i32.to_le_bytes());
        // Bottom row first, BGR, one pad byte.
        assert_eq!(&out[54..], &[6, 5, 4, 0, 3, 2, 1, 0]);
    }

    #[test]
    fn monochrome_layout() {
        let mut row = vec![Pixel::BLACK; 10];
        row[0] = Pixel::WHITE;
        row[9] = Pixel::WHITE;
        let grid = PixelGrid::from_rows(vec![row]);
        let out = encode_bmp(&grid, BmpVariant::Monochrome, &Unstoppable).unwrap();
        assert_eq!(out.len(), 62 + 4);
        assert_eq!(&out[10..14], &62u32.to_le_bytes());
        assert_eq!(&out[28..30], &1u16.to_le_bytes());
        assert_eq!(&out[38..42], &200i32.to_le_bytes());
        assert_eq!(&out[46..50], &2u32.to_le_bytes());
        assert_eq!(&out[54..62], &[0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0]);
        assert_eq!(&out[62..], &[0b1000_0000, 0b0100_0000, 0, 0]);
    }

    #[test]
    fn single_entry_palette() {
        let grid = PixelGrid::from_rows(vec![vec![Pixel::WHITE; 8]]);
        let out = encode_bmp(&grid, BmpVariant::MonochromeSingleEntry, &Unstoppable).unwrap();
        assert_eq!(out.len(), 58 + 4);
        assert_eq!(&out[46..50], &1u32.to_le_bytes());
        assert_eq!(&out[58..], &[0xFF, 0, 0, 0]);
    }

    #[test]
    fn monochrome_ignores_channels() {
        let grid = PixelGrid::from_rows(vec![vec![
            Pixel::with_color(true, 0, 0, 0),
            Pixel::with_color(false, 255, 255, 255),
        ]]);
        let out = encode_bmp(&grid, BmpVariant::Monochrome, &Unstoppable).unwrap();
        assert_eq!(out[62], 0b1000_0000);
    }

    #[test]
    fn invalid_grid_produces_nothing() {
        let ragged = PixelGrid::from_rows(vec![vec![Pixel::BLACK; 2], vec![Pixel::BLACK]]);
        assert!(matches!(
            encode_bmp(&ragged, BmpVariant::Truecolor, &Unstoppable),
            Err(BmpError::InvalidGrid)
        ));
        assert!(matches!(
            encode_bmp(&PixelGrid::new(), BmpVariant::Monochrome, &Unstoppable),
            Err(BmpError::InvalidGrid)
        ));
    }
}
