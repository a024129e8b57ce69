//! BMP header types and the 24-bit / 1-bit codec.
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc. to run it.

mod decode;
mod encode;
mod header;
mod utils;

pub use header::{BmpVariant, FileHeader, InfoHeader, PaletteEntry};

use crate::decode::DecodeOutput;
use crate::error::BmpError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::PixelGrid;
use alloc::vec::Vec;
use enough::Stop;

/// Decode BMP data into a grid, top row first.
pub(crate) fn decode(
    data: &[u8],
    variant: Option<BmpVariant>,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BmpError> {
    let dec = decode::BmpDecoderState::new(data, variant)?;
    if let Some(limits) = limits {
        limits.check_grid(dec.width(), dec.height())?;
    }
    stop.check()?;
    let variant = dec.variant();
    let top_down = dec.info().top_down();
    let (grid, warnings) = dec.decode_rows(stop)?;
    Ok(DecodeOutput {
        grid,
        variant,
        top_down,
        warnings,
    })
}

/// Parse headers only.
pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, BmpError> {
    let decode::BmpHeader { file, info } = decode::parse_bmp_header(data)?;
    Ok(ImageInfo {
        width: info.width.unsigned_abs(),
        height: info.abs_height(),
        top_down: info.top_down(),
        bits_per_pixel: info.bits_per_pixel,
        compression: info.compression,
        variant: BmpVariant::from_header(info.bits_per_pixel, info.colors_used),
        file_header: file,
        info_header: info,
    })
}

/// Encode a grid to BMP.
pub(crate) fn encode(
    grid: &PixelGrid,
    variant: BmpVariant,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    encode::encode_bmp(grid, variant, stop)
}
