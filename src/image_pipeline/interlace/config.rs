//! Interlacing configuration types

use crate::image_pipeline::common::error::{InterlaceError, Result};
use crate::image_pipeline::output::types::TiffCompression;
use crate::image_pipeline::raster::types::Axis;

pub const DEFAULT_PPI: u32 = 300;
pub const DEFAULT_SLICE_THICKNESS: u32 = 10;
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Configuration for one interlacing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterlaceConfig {
    /// Direction the strips alternate in
    pub axis: Axis,
    /// Width (vertical) or height (horizontal) of one strip in the output, in pixels
    pub slice_thickness: u32,
    /// Resolution tag written to the output, pixels per inch
    pub ppi: u32,
    /// Quality used when the output is JPEG (1-100)
    pub jpeg_quality: u8,
    /// Compression used when the output is TIFF
    pub tiff_compression: TiffCompression,
}

impl Default for InterlaceConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            slice_thickness: DEFAULT_SLICE_THICKNESS,
            ppi: DEFAULT_PPI,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            tiff_compression: TiffCompression::Deflate,
        }
    }
}

impl InterlaceConfig {
    pub fn builder() -> InterlaceConfigBuilder {
        InterlaceConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.slice_thickness == 0 {
            return Err(InterlaceError::InvalidInput(
                "slice thickness must be a positive number of pixels".to_string(),
            ));
        }
        if self.ppi == 0 {
            return Err(InterlaceError::InvalidInput(
                "ppi must be a positive number".to_string(),
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(InterlaceError::InvalidInput(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

/// Builder for InterlaceConfig
#[derive(Default)]
pub struct InterlaceConfigBuilder {
    axis: Option<Axis>,
    slice_thickness: Option<u32>,
    ppi: Option<u32>,
    jpeg_quality: Option<u8>,
    tiff_compression: Option<TiffCompression>,
}

impl InterlaceConfigBuilder {
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn horizontal(self, horizontal: bool) -> Self {
        self.axis(if horizontal {
            Axis::Horizontal
        } else {
            Axis::Vertical
        })
    }

    pub fn slice_thickness(mut self, pixels: u32) -> Self {
        self.slice_thickness = Some(pixels);
        self
    }

    pub fn ppi(mut self, ppi: u32) -> Self {
        self.ppi = Some(ppi);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn tiff_compression(mut self, compression: TiffCompression) -> Self {
        self.tiff_compression = Some(compression);
        self
    }

    pub fn build(self) -> InterlaceConfig {
        let default = InterlaceConfig::default();
        InterlaceConfig {
            axis: self.axis.unwrap_or(default.axis),
            slice_thickness: self.slice_thickness.unwrap_or(default.slice_thickness),
            ppi: self.ppi.unwrap_or(default.ppi),
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            tiff_compression: self.tiff_compression.unwrap_or(default.tiff_compression),
        }
    }
}
