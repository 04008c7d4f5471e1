//! Raster module
//!
//! Decoding of source images and the pixel operations the interlacer is
//! built from.

mod reader;
mod image_reader;
pub mod ops;
pub mod types;

pub use reader::RasterReader;
pub use image_reader::ImageCrateReader;
pub use types::{Axis, Dimensions, InterlacedImage, Region};
