//! Output encoding types

use std::path::Path;
use std::str::FromStr;

use image::ImageFormat;

use crate::image_pipeline::common::error::{InterlaceError, Result};

/// Largest ppi a JFIF density field can hold.
pub const MAX_JPEG_PPI: u32 = u16::MAX as u32;

pub(crate) const METERS_PER_INCH: f64 = 0.0254;

/// Largest ppi whose pixels-per-metre value fits the PNG `pHYs` chunk.
pub const MAX_PNG_PPI: u32 = (u32::MAX as f64 * METERS_PER_INCH) as u32;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression, balanced level
    #[default]
    Deflate,
}

impl FromStr for TiffCompression {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "lzw" => Ok(Self::Lzw),
            "deflate" => Ok(Self::Deflate),
            other => Err(format!(
                "unknown TIFF compression '{}' (expected none, lzw or deflate)",
                other
            )),
        }
    }
}

/// Encoded format of the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JPEG with a JFIF density header
    Jpeg,
    /// PNG with a `pHYs` chunk
    Png,
    /// TIFF with XResolution/YResolution tags
    Tiff,
    /// Any other format the `image` crate can write; no resolution tag
    Other(ImageFormat),
}

impl OutputFormat {
    /// Picks the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)
            .map_err(|e| InterlaceError::Encode(format!("{}: {}", path.display(), e)))?;
        Self::from_image_format(format)
    }

    pub fn from_image_format(format: ImageFormat) -> Result<Self> {
        match format {
            ImageFormat::Jpeg => Ok(Self::Jpeg),
            ImageFormat::Png => Ok(Self::Png),
            ImageFormat::Tiff => Ok(Self::Tiff),
            other if other.writing_enabled() => Ok(Self::Other(other)),
            other => Err(InterlaceError::Encode(format!(
                "{:?} output is not supported",
                other
            ))),
        }
    }

    /// Checks that `ppi` fits the resolution field of this format.
    pub fn check_ppi(&self, ppi: u32) -> Result<()> {
        let max = match self {
            Self::Jpeg => MAX_JPEG_PPI,
            Self::Png => MAX_PNG_PPI,
            Self::Tiff | Self::Other(_) => u32::MAX,
        };
        if ppi > max {
            return Err(InterlaceError::InvalidInput(format!(
                "ppi {} exceeds the {:?} limit of {}",
                ppi, self, max
            )));
        }
        Ok(())
    }
}
