//! Pixels and row-major pixel grids.

use alloc::vec::Vec;

/// One image pixel.
///
/// Truecolor images use the three channels. Monochrome images use the
/// `high` (on/off) state; their channels carry the palette color the pixel
/// was decoded with, or black/white for pixels built with [`Pixel::mono`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// On/off state for 1-bit images.
    pub high: bool,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::mono(false);
    pub const WHITE: Pixel = Pixel::mono(true);

    /// Truecolor pixel. Any non-black color counts as "on".
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            high: red != 0 || green != 0 || blue != 0,
        }
    }

    /// Monochrome pixel: white when on, black when off.
    pub const fn mono(high: bool) -> Self {
        let v = if high { 0xFF } else { 0 };
        Self {
            red: v,
            green: v,
            blue: v,
            high,
        }
    }

    /// Monochrome pixel carrying an explicit palette color.
    pub const fn with_color(high: bool, red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            high,
        }
    }
}

/// Row-major pixel grid. Row 0 is the top of the image.
///
/// The grid itself does not enforce rectangularity; use
/// [`PixelGrid::is_valid`] before handing a caller-built grid to an encoder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelGrid {
    rows: Vec<Vec<Pixel>>,
}

impl PixelGrid {
    /// Empty grid (zero rows).
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Wrap caller-supplied rows without validating them.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Self {
        Self { rows }
    }

    /// Build a `width` x `height` grid from a per-pixel function of `(row, col)`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Pixel) -> Self {
        let rows = (0..height)
            .map(|row| (0..width).map(|col| f(row, col)).collect())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Pixel>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[Pixel]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        self.rows.get(row)?.get(col).copied()
    }

    pub fn into_rows(self) -> Vec<Vec<Pixel>> {
        self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of row 0, or 0 for an empty grid.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reverse the row order in place.
    pub fn flip_vertical(&mut self) {
        self.rows.reverse();
    }

    /// Whether this grid is a well-formed image.
    ///
    /// Requires at least one row, a non-zero width, and every row the same
    /// length as row 0. Channel range is guaranteed by `u8`.
    pub fn is_valid(&self) -> bool {
        let width = self.width();
        width > 0 && self.rows.iter().all(|row| row.len() == width)
    }

    /// Copy out as an [`imgref::ImgVec`] of RGB pixels.
    ///
    /// Returns `None` if the grid is not valid.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> Option<imgref::ImgVec<rgb::RGB8>> {
        if !self.is_valid() {
            return None;
        }
        let buf = self
            .rows
            .iter()
            .flat_map(|row| row.iter().map(|&p| rgb::RGB8::from(p)))
            .collect();
        Some(imgref::ImgVec::new(buf, self.width(), self.height()))
    }

    /// Build a truecolor grid from an [`imgref::ImgRef`] of RGB pixels.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGB8>) -> Self {
        let rows = img
            .rows()
            .map(|row| row.iter().map(|&p| Pixel::from(p)).collect())
            .collect();
        Self { rows }
    }
}

impl From<Vec<Vec<Pixel>>> for PixelGrid {
    fn from(rows: Vec<Vec<Pixel>>) -> Self {
        Self::from_rows(rows)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Pixel {
    fn from(p: rgb::RGB8) -> Self {
        Pixel::rgb(p.r, p.g, p.b)
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGB8 {
    fn from(p: Pixel) -> Self {
        rgb::RGB8::new(p.red, p.green, p.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn empty_grid_is_invalid() {
        assert!(!PixelGrid::new().is_valid());
    }

    #[test]
    fn zero_width_grid_is_invalid() {
        let grid = PixelGrid::from_rows(vec![vec![], vec![]]);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 0);
        assert!(!grid.is_valid());
    }

    #[test]
    fn ragged_grid_is_invalid() {
        let grid = PixelGrid::from_rows(vec![
            vec![Pixel::BLACK; 3],
            vec![Pixel::BLACK; 2],
            vec![Pixel::BLACK; 3],
        ]);
        assert!(!grid.is_valid());
    }

    #[test]
    fn rectangular_grid_is_valid() {
        let grid = PixelGrid::from_fn(4, 3, |row, col| Pixel::rgb(row as u8, col as u8, 7));
        assert!(grid.is_valid());
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(2, 1), Some(Pixel::rgb(2, 1, 7)));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn rgb_high_state_tracks_non_black() {
        assert!(!Pixel::rgb(0, 0, 0).high);
        assert!(Pixel::rgb(0, 0, 1).high);
        assert_eq!(Pixel::mono(true), Pixel::with_color(true, 255, 255, 255));
    }

    #[test]
    fn flip_vertical_reverses_rows() {
        let mut grid = PixelGrid::from_rows(vec![vec![Pixel::WHITE], vec![Pixel::BLACK]]);
        grid.flip_vertical();
        assert_eq!(grid.rows(), &[vec![Pixel::BLACK], vec![Pixel::WHITE]]);
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgref_roundtrip() {
        let grid = PixelGrid::from_fn(3, 2, |row, col| Pixel::rgb(10 * row as u8, col as u8, 200));
        let img = grid.to_imgvec().unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(PixelGrid::from_imgref(img.as_ref()), grid);
    }
}
