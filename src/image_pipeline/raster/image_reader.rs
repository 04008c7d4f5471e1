//! Raster reader backed by the `image` crate.
//!
//! Any format the `image` crate was built with (PNG, JPEG, TIFF, BMP, GIF,
//! WebP, ...) is accepted. The format is guessed from the leading bytes, not
//! from the file name.

use std::io::Cursor;

use image::{GenericImageView, ImageReader, RgbaImage};
use tracing::debug;

use crate::image_pipeline::common::error::{InterlaceError, Result};
use crate::image_pipeline::raster::reader::RasterReader;

/// Decodes any raster format supported by the `image` crate into 8-bit RGBA.
pub struct ImageCrateReader;

impl RasterReader for ImageCrateReader {
    /// Decodes an encoded image held in memory.
    ///
    /// # Returns
    ///
    /// * `Ok(RgbaImage)` - Decoded pixels, converted to 8-bit RGBA
    /// * `Err(InterlaceError::Decode)` - Unknown format or corrupt data
    /// * `Err(InterlaceError::InvalidDimensions)` - The image has no pixels
    fn decode(&self, data: &[u8]) -> Result<RgbaImage> {
        debug!("Decoding image, {} bytes", data.len());

        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| InterlaceError::Decode(e.to_string()))?;

        let format = reader.format();
        let decoded = reader
            .decode()
            .map_err(|e| InterlaceError::Decode(e.to_string()))?;

        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(InterlaceError::InvalidDimensions(width, height));
        }

        debug!("Decoded {:?} image: {}x{}", format, width, height);

        Ok(decoded.to_rgba8())
    }
}
