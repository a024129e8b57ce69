//! BMP header layouts, constants, and the variant configuration.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::error::BmpError;

/// Magic signature at offset 0.
pub(crate) const MAGIC: [u8; 2] = *b"BM";
/// Magic plus BITMAPFILEHEADER fields.
pub(crate) const FILE_HEADER_SIZE: u32 = 14;
/// BITMAPINFOHEADER.
pub(crate) const INFO_HEADER_SIZE: u32 = 40;
pub(crate) const PALETTE_ENTRY_SIZE: u32 = 4;

/// 72 DPI, the usual default for truecolor writers.
const TRUECOLOR_PIXELS_PER_METER: i32 = 2835;
const MONOCHROME_PIXELS_PER_METER: i32 = 200;

/// Pixel depth and palette layout of a BMP file.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BmpVariant {
    /// 24 bits per pixel, stored as B, G, R. No palette.
    #[default]
    Truecolor,
    /// 1 bit per pixel with a two-entry palette: index 0 is off, index 1 is on.
    Monochrome,
    /// 1 bit per pixel with a single palette entry for the off color.
    MonochromeSingleEntry,
}

impl BmpVariant {
    pub const fn bits_per_pixel(self) -> u16 {
        match self {
            Self::Truecolor => 24,
            Self::Monochrome | Self::MonochromeSingleEntry => 1,
        }
    }

    /// Number of color table entries written and read.
    pub const fn palette_entries(self) -> u32 {
        match self {
            Self::Truecolor => 0,
            Self::Monochrome => 2,
            Self::MonochromeSingleEntry => 1,
        }
    }

    /// Stored bytes per row, padded to a multiple of 4.
    pub fn row_stride(self, width: usize) -> Option<usize> {
        width
            .checked_mul(usize::from(self.bits_per_pixel()))?
            .div_ceil(32)
            .checked_mul(4)
    }

    /// Offset of the pixel data this crate writes.
    pub const fn pixel_data_offset(self) -> u32 {
        FILE_HEADER_SIZE + INFO_HEADER_SIZE + self.palette_entries() * PALETTE_ENTRY_SIZE
    }

    pub(crate) const fn pixels_per_meter(self) -> i32 {
        match self {
            Self::Truecolor => TRUECOLOR_PIXELS_PER_METER,
            Self::Monochrome | Self::MonochromeSingleEntry => MONOCHROME_PIXELS_PER_METER,
        }
    }

    /// Pick the variant a file declares. `None` for depths this crate does not decode.
    pub fn from_header(bits_per_pixel: u16, colors_used: u32) -> Option<Self> {
        match (bits_per_pixel, colors_used) {
            (24, _) => Some(Self::Truecolor),
            (1, 1) => Some(Self::MonochromeSingleEntry),
            (1, _) => Some(Self::Monochrome),
            _ => None,
        }
    }
}

/// BITMAPFILEHEADER without the magic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileHeader {
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Absolute offset of the first pixel row.
    pub bmp_offset: u32,
}

/// BITMAPINFOHEADER. A negative `height` means rows are stored top-first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    pub fn top_down(&self) -> bool {
        self.height < 0
    }

    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Header this crate writes for a `width` x `height` image.
    pub(crate) fn for_image(variant: BmpVariant, width: i32, height: i32) -> Self {
        let ppm = variant.pixels_per_meter();
        Self {
            header_size: INFO_HEADER_SIZE,
            width,
            height,
            planes: 1,
            bits_per_pixel: variant.bits_per_pixel(),
            compression: 0,
            image_size: 0,
            x_pixels_per_meter: ppm,
            y_pixels_per_meter: ppm,
            colors_used: variant.palette_entries(),
            colors_important: 0,
        }
    }
}

/// Color table entry, stored as B, G, R, reserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    /// Must be zero.
    pub reserved: u8,
}

impl PaletteEntry {
    pub const BLACK: PaletteEntry = PaletteEntry::gray(0);
    pub const WHITE: PaletteEntry = PaletteEntry::gray(0xFF);

    const fn gray(v: u8) -> Self {
        Self {
            blue: v,
            green: v,
            red: v,
            reserved: 0,
        }
    }

    pub(crate) fn from_bytes([blue, green, red, reserved]: [u8; 4]) -> Self {
        Self {
            blue,
            green,
            red,
            reserved,
        }
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.blue, self.green, self.red, self.reserved]);
    }
}

// ── Little-endian cursor ────────────────────────────────────────────

/// Bounds-checked reader over the whole file.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Seek to an absolute offset.
    pub(crate) fn set_position(&mut self, pos: usize) -> Result<(), BmpError> {
        if pos > self.data.len() {
            return Err(BmpError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    pub(crate) fn read_slice(&mut self, n: usize) -> Result<&'a [u8], BmpError> {
        let end = self.pos.checked_add(n).ok_or(BmpError::UnexpectedEof)?;
        let slice = self.data.get(self.pos..end).ok_or(BmpError::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Like [`read_slice`](Self::read_slice), but bytes past the end read as zero.
    pub(crate) fn read_zero_filled(&mut self, n: usize) -> Cow<'a, [u8]> {
        let available = self.remaining().min(n);
        let head = &self.data[self.pos..self.pos + available];
        self.pos += available;
        if available == n {
            return Cow::Borrowed(head);
        }
        let mut buf = Vec::with_capacity(n);
        buf.extend_from_slice(head);
        buf.resize(n, 0);
        Cow::Owned(buf)
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_slice(N)?);
        Ok(buf)
    }

    pub(crate) fn get_u16_le(&mut self) -> Result<u16, BmpError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    pub(crate) fn get_u32_le(&mut self) -> Result<u32, BmpError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    pub(crate) fn get_i32_le(&mut self) -> Result<i32, BmpError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

impl FileHeader {
    /// Read the magic and file header from the start of `cursor`.
    pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self, BmpError> {
        let magic = cursor
            .read_fixed_bytes::<2>()
            .map_err(|_| BmpError::BadMagic)?;
        if magic != MAGIC {
            return Err(BmpError::BadMagic);
        }
        Ok(Self {
            file_size: cursor.get_u32_le()?,
            reserved1: cursor.get_u16_le()?,
            reserved2: cursor.get_u16_le()?,
            bmp_offset: cursor.get_u32_le()?,
        })
    }

    /// Write the magic and file header.
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.bmp_offset.to_le_bytes());
    }
}

impl InfoHeader {
    /// Read the 40-byte info header and skip any larger header's extra fields.
    pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self, BmpError> {
        let start = cursor.position();
        let header_size = cursor.get_u32_le()?;
        if header_size < INFO_HEADER_SIZE {
            return Err(BmpError::InvalidHeader(alloc::format!(
                "unsupported BMP info header size: {header_size}"
            )));
        }
        let header = Self {
            header_size,
            width: cursor.get_i32_le()?,
            height: cursor.get_i32_le()?,
            planes: cursor.get_u16_le()?,
            bits_per_pixel: cursor.get_u16_le()?,
            compression: cursor.get_u32_le()?,
            image_size: cursor.get_u32_le()?,
            x_pixels_per_meter: cursor.get_i32_le()?,
            y_pixels_per_meter: cursor.get_i32_le()?,
            colors_used: cursor.get_u32_le()?,
            colors_important: cursor.get_u32_le()?,
        };
        // Palette follows the full header, whatever its declared size.
        let end = start
            .checked_add(header_size as usize)
            .ok_or(BmpError::UnexpectedEof)?;
        cursor.set_position(end)?;
        Ok(header)
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_important.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_stride_is_multiple_of_four() {
        assert_eq!(BmpVariant::Truecolor.row_stride(1), Some(4));
        assert_eq!(BmpVariant::Truecolor.row_stride(4), Some(12));
        assert_eq!(BmpVariant::Truecolor.row_stride(5), Some(16));
        assert_eq!(BmpVariant::Monochrome.row_stride(1), Some(4));
        assert_eq!(BmpVariant::Monochrome.row_stride(10), Some(4));
        assert_eq!(BmpVariant::Monochrome.row_stride(33), Some(8));
        assert_eq!(BmpVariant::Truecolor.row_stride(usize::MAX), None);
    }

    #[test]
    fn pixel_data_offsets() {
        assert_eq!(BmpVariant::Truecolor.pixel_data_offset(), 54);
        assert_eq!(BmpVariant::Monochrome.pixel_data_offset(), 62);
        assert_eq!(BmpVariant::MonochromeSingleEntry.pixel_data_offset(), 58);
    }

    #[test]
    fn variant_from_header() {
        assert_eq!(BmpVariant::from_header(24, 0), Some(BmpVariant::Truecolor));
        assert_eq!(BmpVariant::from_header(1, 0), Some(BmpVariant::Monochrome));
        assert_eq!(BmpVariant::from_header(1, 2), Some(BmpVariant::Monochrome));
        assert_eq!(
            BmpVariant::from_header(1, 1),
            Some(BmpVariant::MonochromeSingleEntry)
        );
        assert_eq!(BmpVariant::from_header(8, 256), None);
    }

    #[test]
    fn info_header_write_then_read() {
        let header = InfoHeader::for_image(BmpVariant::Monochrome, 10, -3);
        let mut out = Vec::new();
        header.write(&mut out);
        assert_eq!(out.len(), INFO_HEADER_SIZE as usize);

        let mut cursor = Cursor::new(&out);
        let parsed = InfoHeader::read(&mut cursor).unwrap();
        assert_eq!(parsed, header);
        assert!(parsed.top_down());
        assert_eq!(parsed.abs_height(), 3);
        assert_eq!(cursor.position(), 40);
    }

    #[test]
    fn short_info_header_is_rejected() {
        let mut data = [0u8; 40];
        data[..4].copy_from_slice(&12u32.to_le_bytes());
        assert!(matches!(
            InfoHeader::read(&mut Cursor::new(&data)),
            Err(BmpError::InvalidHeader(_))
        ));
    }

    #[test]
    fn zero_filled_read_pads_short_data() {
        let mut cursor = Cursor::new(&[1, 2, 3]);
        cursor.set_position(1).unwrap();
        assert_eq!(&*cursor.read_zero_filled(2), &[2, 3]);
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(&*cursor.read_zero_filled(3), &[0, 0, 0]);

        let mut cursor = Cursor::new(&[9, 8]);
        assert_eq!(&*cursor.read_zero_filled(4), &[9, 8, 0, 0]);
    }

    #[test]
    fn missing_magic() {
        assert!(matches!(
            FileHeader::read(&mut Cursor::new(b"PM\0\0\0\0\0\0\0\0\0\0\0\0")),
            Err(BmpError::BadMagic)
        ));
        assert!(matches!(
            FileHeader::read(&mut Cursor::new(b"B")),
            Err(BmpError::BadMagic)
        ));
    }
}
