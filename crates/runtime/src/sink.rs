//! Destinations for rendered frames.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use raster::Frame;

/// Receives frames in order.
pub trait FrameSink {
    /// Called once per rendered frame with its zero-based index.
    ///
    /// # Errors
    ///
    /// Implementations report write failures.
    fn write_frame(&mut self, index: usize, frame: &Frame) -> Result<()>;

    /// Called once after the last frame.
    ///
    /// # Errors
    ///
    /// Implementations report flush failures.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Discards every frame.
#[derive(Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn write_frame(&mut self, _index: usize, _frame: &Frame) -> Result<()> {
        Ok(())
    }
}

impl FrameSink for Vec<Frame> {
    fn write_frame(&mut self, _index: usize, frame: &Frame) -> Result<()> {
        self.push(frame.clone());
        Ok(())
    }
}

/// On-disk frame encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrameFormat {
    /// One PNG file per frame.
    Png,
    /// One uncompressed 24-bit BMP file per frame.
    Bmp,
    /// A single `frames.bgr` stream of packed bgr24 frames, the layout
    /// `ffmpeg -f rawvideo -pix_fmt bgr24` reads.
    Bgr,
}

/// Writes frames into a directory.
pub struct DirectorySink {
    dir: PathBuf,
    format: FrameFormat,
    stream: Option<BufWriter<File>>,
}

impl DirectorySink {
    /// Creates `dir` (and parents) if needed.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>, format: FrameFormat) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        Ok(Self { dir, format, stream: None })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn frame_path(&self, index: usize, extension: &str) -> PathBuf {
        self.dir.join(format!("frame_{index:05}.{extension}"))
    }
}

impl FrameSink for DirectorySink {
    fn write_frame(&mut self, index: usize, frame: &Frame) -> Result<()> {
        match self.format {
            FrameFormat::Png => {
                let path = self.frame_path(index, "png");
                frame.save_png(&path).with_context(|| format!("writing {}", path.display()))?;
            }
            FrameFormat::Bmp => {
                let path = self.frame_path(index, "bmp");
                frame.save_bmp(&path).with_context(|| format!("writing {}", path.display()))?;
            }
            FrameFormat::Bgr => {
                if self.stream.is_none() {
                    let path = self.dir.join("frames.bgr");
                    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
                    self.stream = Some(BufWriter::new(file));
                }
                if let Some(stream) = self.stream.as_mut() {
                    stream.write_all(&frame.to_bgr()).context("writing frames.bgr")?;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            stream.flush().context("flushing frames.bgr")?;
        }
        Ok(())
    }
}
