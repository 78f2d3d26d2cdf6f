#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Raster
//!
//! Fixed-size RGB pixel buffers for visualising environment frames.
//!
//! A [`Frame`] stores `width * height * 3` bytes in row-major order, one
//! `[r, g, b]` triplet per pixel starting at the top-left corner. The
//! [`draw`] module provides the integer line, rectangle and circle routines
//! the environments use, and [`export`] turns frames into raw `bgr24`
//! streams, BMP files or PNG images.
//!
//! Drawing never fails: coordinates outside the buffer are skipped so that
//! bodies which swing partly off-canvas are still drawn up to the edge.

pub mod draw;
pub mod export;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("frame dimensions must be non-zero, got {width}x{height}")]
    EmptyFrame { width: usize, height: usize },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// An RGB colour triplet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BROWN: Rgb = Rgb(139, 69, 19);
}

/// A row-major RGB pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Frame {
    /// Allocates a black frame of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::EmptyFrame`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyFrame { width, height });
        }
        Ok(Self { width, height, pixels: vec![0; width * height * 3] })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw `[r, g, b]` bytes, rows top to bottom.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Colour at `(x, y)`, or `None` outside the frame.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        let i = self.index(x, y)?;
        Some(Rgb(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Writes one pixel. Out-of-bounds coordinates are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, colour: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = colour.0;
            self.pixels[i + 1] = colour.1;
            self.pixels[i + 2] = colour.2;
        }
    }

    /// Fills the whole frame with one colour.
    pub fn clear(&mut self, colour: Rgb) {
        for px in self.pixels.chunks_exact_mut(3) {
            px[0] = colour.0;
            px[1] = colour.1;
            px[2] = colour.2;
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) * 3)
    }
}
