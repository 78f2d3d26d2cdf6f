//! Frame exporters.
//!
//! [`Frame::to_bgr`] produces the packed `bgr24` layout that `rawvideo`
//! consumers expect. [`Frame::write_bmp`] and [`Frame::save_png`] encode
//! through the `image` crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::ColorType;

use crate::{Frame, RasterError};

impl Frame {
    /// Packed `[b, g, r]` triplets, rows top to bottom.
    #[must_use]
    pub fn to_bgr(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len());
        for px in self.pixels.chunks_exact(3) {
            out.extend_from_slice(&[px[2], px[1], px[0]]);
        }
        out
    }

    /// Writes the frame as an uncompressed 24-bit BMP.
    ///
    /// Rows are stored bottom to top, each padded to a multiple of four
    /// bytes, with BGR byte order.
    ///
    /// # Errors
    ///
    /// Propagates encoder and writer errors.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_bmp<W: Write>(&self, mut writer: W) -> Result<(), RasterError> {
        BmpEncoder::new(&mut writer).encode(
            &self.pixels,
            self.width as u32,
            self.height as u32,
            ColorType::Rgb8,
        )?;
        writer.flush()?;
        Ok(())
    }

    /// Writes a BMP file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save_bmp(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        let file = File::create(path)?;
        self.write_bmp(BufWriter::new(file))
    }

    /// Encodes the frame as PNG at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    #[allow(clippy::cast_possible_truncation)]
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width as u32,
            self.height as u32,
            ColorType::Rgb8,
        )?;
        Ok(())
    }
}
