use image::RgbaImage;

use crate::image_pipeline::common::error::Result;

pub trait RasterReader {
    fn decode(&self, data: &[u8]) -> Result<RgbaImage>;
}
