//! File and stream entry points (`std` feature).
//!
//! Decoding reads the whole source before parsing, and encoding builds the
//! whole file in memory before the sink is touched. A failed encode never
//! creates or truncates the target file.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use enough::Stop;
use log::error;

use crate::bmp::BmpVariant;
use crate::decode::{DecodeOutput, DecodeRequest};
use crate::encode::EncodeRequest;
use crate::error::BmpError;
use crate::pixel::PixelGrid;

/// Decode a BMP from any reader.
pub fn decode_reader(
    mut reader: impl Read,
    variant: Option<BmpVariant>,
    stop: impl Stop,
) -> Result<DecodeOutput, BmpError> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|e| BmpError::SourceUnavailable(e.to_string()))?;
    let request = DecodeRequest::new(&data);
    match variant {
        Some(v) => request.with_variant(v).decode(stop),
        None => request.decode(stop),
    }
}

/// Decode a BMP file.
pub fn decode_file(
    path: impl AsRef<Path>,
    variant: Option<BmpVariant>,
    stop: impl Stop,
) -> Result<DecodeOutput, BmpError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        error!("cannot open BMP source {}: {e}", path.display());
        BmpError::SourceUnavailable(format!("{}: {e}", path.display()))
    })?;
    decode_reader(file, variant, stop)
        .inspect_err(|e| error!("cannot decode BMP {}: {e}", path.display()))
}

/// Encode a grid and write it to `writer`. Nothing is written if encoding fails.
pub fn encode_writer(
    grid: &PixelGrid,
    variant: BmpVariant,
    mut writer: impl Write,
    stop: impl Stop,
) -> Result<(), BmpError> {
    let data = encode_logged(grid, variant, stop)?;
    writer
        .write_all(&data)
        .and_then(|()| writer.flush())
        .map_err(|e| BmpError::SinkUnavailable(e.to_string()))
}

/// Encode a grid to a BMP file. The file is only created once encoding succeeded.
pub fn encode_file(
    grid: &PixelGrid,
    variant: BmpVariant,
    path: impl AsRef<Path>,
    stop: impl Stop,
) -> Result<(), BmpError> {
    let path = path.as_ref();
    let data = encode_logged(grid, variant, stop)?;
    let sink_error = |e: std::io::Error| {
        error!("cannot write BMP sink {}: {e}", path.display());
        BmpError::SinkUnavailable(format!("{}: {e}", path.display()))
    };
    let mut file = File::create(path).map_err(sink_error)?;
    file.write_all(&data).map_err(sink_error)
}

fn encode_logged(
    grid: &PixelGrid,
    variant: BmpVariant,
    stop: impl Stop,
) -> Result<Vec<u8>, BmpError> {
    EncodeRequest::new(variant).encode(grid, stop).inspect_err(|e| {
        if matches!(e, BmpError::InvalidGrid) {
            error!("refusing to encode: pixel grid is not a valid image");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use enough::Unstoppable;

    #[test]
    fn writer_roundtrip() {
        let grid = PixelGrid::from_fn(3, 2, |row, col| Pixel::rgb(row as u8, col as u8, 9));
        let mut sink = Vec::new();
        encode_writer(&grid, BmpVariant::Truecolor, &mut sink, Unstoppable).unwrap();
        let decoded = decode_reader(sink.as_slice(), None, Unstoppable).unwrap();
        assert_eq!(decoded.grid, grid);
    }

    #[test]
    fn invalid_grid_writes_nothing() {
        let mut sink = Vec::new();
        let result =
            encode_writer(&PixelGrid::new(), BmpVariant::Truecolor, &mut sink, Unstoppable);
        assert!(matches!(result, Err(BmpError::InvalidGrid)));
        assert!(sink.is_empty());
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = decode_file(dir.path().join("nope.bmp"), None, Unstoppable);
        assert!(matches!(result, Err(BmpError::SourceUnavailable(_))));
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a.bmp");
        std::fs::write(&path, b"GIF89a").unwrap();
        let result = decode_file(&path, None, Unstoppable);
        assert!(matches!(result, Err(BmpError::BadMagic)));

        let grid = PixelGrid::from_fn(4, 3, |_, _| Pixel::WHITE);
        let mut data = crate::encode_bmp(&grid, Unstoppable).unwrap();
        data.truncate(data.len() - 1);
        std::fs::write(&path, &data).unwrap();
        let result = decode_file(&path, None, Unstoppable);
        assert!(matches!(result, Err(BmpError::UnexpectedEof)));
    }

    #[test]
    fn failed_encode_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bmp");
        let result = encode_file(&PixelGrid::new(), BmpVariant::Monochrome, &path, Unstoppable);
        assert!(matches!(result, Err(BmpError::InvalidGrid)));
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_path_is_sink_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let grid = PixelGrid::from_fn(1, 1, |_, _| Pixel::WHITE);
        let result = encode_file(&grid, BmpVariant::Monochrome, dir.path(), Unstoppable);
        assert!(matches!(result, Err(BmpError::SinkUnavailable(_))));
    }
}
