use std::io::{Cursor, Write};

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::{JpegEncoder, PixelDensity, PixelDensityUnit};
use image::{DynamicImage, RgbImage};
use tracing::{debug, warn};

use crate::image_pipeline::common::error::{InterlaceError, Result};
use crate::image_pipeline::interlace::InterlaceConfig;
use crate::image_pipeline::output::types::{METERS_PER_INCH, OutputFormat, TiffCompression};
use crate::image_pipeline::output::writer::RasterWriter;
use crate::image_pipeline::raster::types::InterlacedImage;

pub struct StandardRasterWriter;

fn encode_err<E: std::fmt::Display>(e: E) -> InterlaceError {
    InterlaceError::Encode(e.to_string())
}

impl StandardRasterWriter {
    fn encode_jpeg(&self, rgb: &RgbImage, ppi: u32, quality: u8, buffer: &mut Vec<u8>) -> Result<()> {
        let density = u16::try_from(ppi).map_err(|_| {
            InterlaceError::InvalidInput(format!("ppi {} does not fit a JPEG density field", ppi))
        })?;

        let mut encoder = JpegEncoder::new_with_quality(buffer, quality);
        encoder.set_pixel_density(PixelDensity {
            density: (density, density),
            unit: PixelDensityUnit::Inches,
        });
        encoder.encode_image(rgb).map_err(encode_err)
    }

    fn encode_png(&self, rgb: &RgbImage, ppi: u32, buffer: &mut Vec<u8>) -> Result<()> {
        OutputFormat::Png.check_ppi(ppi)?;
        let ppm = (ppi as f64 / METERS_PER_INCH).round() as u32;

        let mut encoder = png::Encoder::new(buffer, rgb.width(), rgb.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header().map_err(encode_err)?;
        writer.write_image_data(rgb.as_raw()).map_err(encode_err)?;
        writer.finish().map_err(encode_err)
    }

    fn encode_tiff(
        &self,
        rgb: &RgbImage,
        ppi: u32,
        compression: TiffCompression,
        buffer: &mut Vec<u8>,
    ) -> Result<()> {
        let compression = match compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::Deflate => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Balanced,
            ),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(Cursor::new(buffer))
            .map_err(encode_err)?
            .with_compression(compression);

        let mut tiff_image = encoder
            .new_image::<tiff::encoder::colortype::RGB8>(rgb.width(), rgb.height())
            .map_err(encode_err)?;
        tiff_image.resolution(
            tiff::tags::ResolutionUnit::Inch,
            tiff::encoder::Rational { n: ppi, d: 1 },
        );
        tiff_image.write_data(rgb.as_raw()).map_err(encode_err)
    }
}

impl RasterWriter for StandardRasterWriter {
    fn write_image(
        &self,
        image: &InterlacedImage,
        format: OutputFormat,
        output: &mut dyn Write,
        config: &InterlaceConfig,
    ) -> Result<()> {
        debug!(
            "Encoding {:?} image: {}x{} at {} ppi",
            format,
            image.pixels.width(),
            image.pixels.height(),
            image.ppi
        );

        // The canvas starts opaque and compositing never lowers alpha.
        let rgb: RgbImage = image.pixels.convert();
        let mut buffer = Vec::new();

        match format {
            OutputFormat::Jpeg => {
                self.encode_jpeg(&rgb, image.ppi, config.jpeg_quality, &mut buffer)?
            }
            OutputFormat::Png => self.encode_png(&rgb, image.ppi, &mut buffer)?,
            OutputFormat::Tiff => {
                self.encode_tiff(&rgb, image.ppi, config.tiff_compression, &mut buffer)?
            }
            OutputFormat::Other(format) => {
                warn!(
                    "{:?} output does not store resolution, {} ppi tag dropped",
                    format, image.ppi
                );
                DynamicImage::ImageRgb8(rgb)
                    .write_to(&mut Cursor::new(&mut buffer), format)
                    .map_err(encode_err)?;
            }
        }

        output.write_all(&buffer).map_err(encode_err)?;
        output.flush().map_err(encode_err)?;

        debug!("Encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
