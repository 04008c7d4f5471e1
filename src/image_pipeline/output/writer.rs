use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::interlace::InterlaceConfig;
use crate::image_pipeline::output::types::OutputFormat;
use crate::image_pipeline::raster::types::InterlacedImage;

pub trait RasterWriter {
    fn write_image(
        &self,
        image: &InterlacedImage,
        format: OutputFormat,
        output: &mut dyn Write,
        config: &InterlaceConfig,
    ) -> Result<()>;
}
