//! # bmpgrid
//!
//! Windows BMP decoder and encoder for row-major pixel grids.
//!
//! ## Supported Formats
//!
//! - **24-bit truecolor** — 3 bytes per pixel (B, G, R), no palette
//! - **1-bit monochrome** — 8 pixels per byte, most significant bit first,
//!   with a two-entry (off/on) or single-entry color table
//!
//! Rows are padded to 4 bytes. Files may store rows bottom-up (positive
//! height) or top-down (negative height); decoded grids always have row 0
//! at the top. The encoder always writes bottom-up.
//!
//! ## Soft warnings
//!
//! A depth other than the configured one, a non-zero compression field, or
//! a palette entry with a non-zero reserved byte does not stop decoding.
//! Each is logged with [`log::warn!`] and collected in
//! [`DecodeOutput::warnings`]; the rows are read with the configured layout.
//! If that layout needs more pixel bytes than a foreign-depth file holds, the
//! rest read as zero, so the grid always has the header's width and height.
//!
//! ## Non-Goals
//!
//! - 4/8/16/32-bit depths
//! - RLE, bitfield, JPEG or PNG compression
//! - Color profiles, OS/2 and V4/V5-specific header fields
//!
//! ## Usage
//!
//! ```no_run
//! use bmpgrid::{DecodeRequest, EncodeRequest, Pixel, PixelGrid, Unstoppable};
//!
//! let grid = PixelGrid::from_fn(200, 200, |_, col| Pixel::mono(col % 2 == 1));
//! let encoded = EncodeRequest::monochrome().encode(&grid, Unstoppable)?;
//!
//! let decoded = DecodeRequest::new(&encoded).decode(Unstoppable)?;
//! assert_eq!(decoded.grid, grid);
//! # Ok::<(), bmpgrid::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod encode;

#[cfg(feature = "std")]
mod bitmap;
#[cfg(feature = "std")]
mod io;

// Re-exports
pub use bmp::BmpVariant;
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{BmpError, DecodeWarning};
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{Pixel, PixelGrid};

#[cfg(feature = "std")]
pub use bitmap::Bitmap;
#[cfg(feature = "std")]
pub use io::{decode_file, decode_reader, encode_file, encode_writer};

/// Decode a BMP with the layout its header declares.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BmpError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode a BMP, reading rows as `variant` whatever the header declares.
pub fn decode_bmp_as(
    data: &[u8],
    variant: BmpVariant,
    stop: impl Stop,
) -> Result<DecodeOutput, BmpError> {
    DecodeRequest::new(data).with_variant(variant).decode(stop)
}

/// Encode a grid as 24-bit BMP.
pub fn encode_bmp(grid: &PixelGrid, stop: impl Stop) -> Result<alloc::vec::Vec<u8>, BmpError> {
    EncodeRequest::truecolor().encode(grid, stop)
}

/// Encode a grid as 1-bit BMP with a black/white palette.
pub fn encode_bmp_mono(
    grid: &PixelGrid,
    stop: impl Stop,
) -> Result<alloc::vec::Vec<u8>, BmpError> {
    EncodeRequest::monochrome().encode(grid, stop)
}
