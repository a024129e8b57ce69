//! Decode requests and their output.

use alloc::vec::Vec;

use enough::Stop;

use crate::bmp::{self, BmpVariant};
use crate::error::{BmpError, DecodeWarning};
use crate::limits::Limits;
use crate::pixel::PixelGrid;

/// Decoded image: the grid plus what the decoder learned along the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOutput {
    /// Pixels, row 0 at the top.
    pub grid: PixelGrid,
    /// Layout the rows were read with.
    pub variant: BmpVariant,
    /// The file stored rows top row first.
    pub top_down: bool,
    /// Soft problems found while decoding, in the order they were found.
    pub warnings: Vec<DecodeWarning>,
}

impl DecodeOutput {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Take the grid, dropping the metadata.
    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }
}

/// Decode request builder.
///
/// ```no_run
/// use bmpgrid::{BmpVariant, DecodeRequest, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let decoded = DecodeRequest::new(data)
///     .with_variant(BmpVariant::Monochrome)
///     .decode(Unstoppable)?;
/// for w in &decoded.warnings {
///     eprintln!("warning: {w}");
/// }
/// # Ok::<(), bmpgrid::BmpError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    variant: Option<BmpVariant>,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    /// Decode with the layout the file declares.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            variant: None,
            limits: None,
        }
    }

    /// Read rows with this layout whatever the file declares.
    ///
    /// A mismatched depth is reported as [`DecodeWarning::UnsupportedDepth`].
    pub fn with_variant(mut self, variant: BmpVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, BmpError> {
        bmp::decode(self.data, self.variant, self.limits, &stop)
    }
}
