//! BMP decoder for uncompressed 24-bit and 1-bit images.
//!
//! Unsupported depth, non-zero compression and a dirty palette are soft
//! warnings: the rows are still read with the configured layout. When the
//! depth differs, pixel data shorter than that layout is zero-filled so the
//! grid keeps the header's shape. Truncated data at the declared depth and a
//! missing signature are hard errors.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use enough::Stop;
use log::{debug, warn};

use super::header::{Cursor, FileHeader, InfoHeader, PaletteEntry};
use super::utils::unpack_bits;
use super::BmpVariant;
use crate::error::{BmpError, DecodeWarning};
use crate::pixel::{Pixel, PixelGrid};

// ── Parsed BMP header info ──────────────────────────────────────────

pub(crate) struct BmpHeader {
    pub file: FileHeader,
    pub info: InfoHeader,
}

/// Parse the file and info headers without touching the palette or pixels.
pub(crate) fn parse_bmp_header(data: &[u8]) -> Result<BmpHeader, BmpError> {
    let mut cursor = Cursor::new(data);
    let file = FileHeader::read(&mut cursor)?;
    let info = InfoHeader::read(&mut cursor)?;
    Ok(BmpHeader { file, info })
}

// ── Decoder state ───────────────────────────────────────────────────

pub(crate) struct BmpDecoderState<'a> {
    bytes: Cursor<'a>,
    file: FileHeader,
    info: InfoHeader,
    width: usize,
    height: usize,
    flip_vertically: bool,
    variant: BmpVariant,
    /// Off color, then on color.
    palette: [PaletteEntry; 2],
    warnings: Vec<DecodeWarning>,
}

impl<'a> BmpDecoderState<'a> {
    /// Read and check all headers and the color table.
    ///
    /// With `configured == None` the variant is taken from the file.
    pub(crate) fn new(data: &'a [u8], configured: Option<BmpVariant>) -> Result<Self, BmpError> {
        let mut bytes = Cursor::new(data);
        let file = FileHeader::read(&mut bytes)?;
        let info = InfoHeader::read(&mut bytes)?;

        if info.width <= 0 {
            return Err(BmpError::InvalidHeader(alloc::format!(
                "BMP width is {}",
                info.width
            )));
        }
        if info.height == 0 {
            return Err(BmpError::InvalidHeader("BMP height is zero".into()));
        }

        let mut warnings = Vec::new();
        let declared = BmpVariant::from_header(info.bits_per_pixel, info.colors_used);
        let variant = configured.or(declared).unwrap_or_default();
        if info.bits_per_pixel != variant.bits_per_pixel() {
            warnings.push(DecodeWarning::UnsupportedDepth {
                found: info.bits_per_pixel,
                expected: variant.bits_per_pixel(),
            });
        }
        if info.compression != 0 {
            warnings.push(DecodeWarning::Compressed(info.compression));
        }

        let mut dec = Self {
            bytes,
            file,
            info,
            width: info.width as usize,
            height: info.abs_height() as usize,
            flip_vertically: !info.top_down(),
            variant,
            palette: [PaletteEntry::BLACK, PaletteEntry::WHITE],
            warnings,
        };
        dec.read_palette()?;

        for w in &dec.warnings {
            warn!("{w}");
        }
        debug!(
            "BMP {}x{} {}-bit ({:?}), {}, pixel data at {}",
            dec.width,
            dec.height,
            info.bits_per_pixel,
            variant,
            if dec.flip_vertically { "bottom-up" } else { "top-down" },
            file.bmp_offset,
        );
        Ok(dec)
    }

    pub(crate) fn width(&self) -> u32 {
        self.width as u32
    }

    pub(crate) fn height(&self) -> u32 {
        self.height as u32
    }

    pub(crate) fn variant(&self) -> BmpVariant {
        self.variant
    }

    pub(crate) fn info(&self) -> &InfoHeader {
        &self.info
    }

    fn read_palette(&mut self) -> Result<(), BmpError> {
        for index in 0..self.variant.palette_entries() as usize {
            let entry = PaletteEntry::from_bytes(self.bytes.read_fixed_bytes::<4>()?);
            if entry.reserved != 0 {
                self.warnings.push(DecodeWarning::BadPalette {
                    index,
                    reserved: entry.reserved,
                });
            }
            self.palette[index] = entry;
        }
        Ok(())
    }

    fn palette_pixel(&self, high: bool) -> Pixel {
        let entry = self.palette[usize::from(high)];
        Pixel::with_color(high, entry.red, entry.green, entry.blue)
    }

    /// Decode every row into a grid with row 0 at the top. Consumes the state.
    pub(crate) fn decode_rows(
        mut self,
        stop: &dyn Stop,
    ) -> Result<(PixelGrid, Vec<DecodeWarning>), BmpError> {
        let stride = self
            .variant
            .row_stride(self.width)
            .ok_or(BmpError::DimensionsTooLarge {
                width: self.width(),
                height: self.height(),
            })?;
        let pixel_bytes = stride
            .checked_mul(self.height)
            .ok_or(BmpError::DimensionsTooLarge {
                width: self.width(),
                height: self.height(),
            })?;

        self.bytes.set_position(self.file.bmp_offset as usize)?;
        // Fail on truncation before allocating any rows.
        let pixel_data = if self.info.bits_per_pixel == self.variant.bits_per_pixel() {
            Cow::Borrowed(self.bytes.read_slice(pixel_bytes)?)
        } else {
            // Foreign depth: at least 1-bit rows must be present, the rest reads as zero.
            let min_bytes = BmpVariant::Monochrome
                .row_stride(self.width)
                .and_then(|s| s.checked_mul(self.height))
                .ok_or(BmpError::UnexpectedEof)?;
            let available = self.bytes.remaining();
            if available < min_bytes {
                return Err(BmpError::UnexpectedEof);
            }
            if available < pixel_bytes {
                let short = DecodeWarning::ShortPixelData {
                    expected: pixel_bytes,
                    available,
                };
                warn!("{short}");
                self.warnings.push(short);
            }
            self.bytes.read_zero_filled(pixel_bytes)
        };

        let off = self.palette_pixel(false);
        let on = self.palette_pixel(true);
        let mut bits = Vec::with_capacity(self.width);

        let mut rows = Vec::with_capacity(self.height);
        for (row_idx, stored) in pixel_data.chunks_exact(stride).enumerate() {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            let row: Vec<Pixel> = match self.variant.bits_per_pixel() {
                24 => stored
                    .chunks_exact(3)
                    .take(self.width)
                    .map(|bgr| Pixel::rgb(bgr[2], bgr[1], bgr[0]))
                    .collect(),
                _ => {
                    bits.clear();
                    unpack_bits(stored, self.width, &mut bits);
                    bits.iter().map(|&high| if high { on } else { off }).collect()
                }
            };
            rows.push(row);
        }

        if self.flip_vertically {
            rows.reverse();
        }
        Ok((PixelGrid::from_rows(rows), self.warnings))
    }
}
