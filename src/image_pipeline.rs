//! Image interlacing pipeline module
//!
//! This module provides a structured approach to lenticular interlacing,
//! with separate modules for raster decoding and pixel operations, output
//! encoding, and interlacing orchestration.

pub mod common;
pub mod raster;
pub mod output;
pub mod interlace;

pub use common::{
    InterlaceError,
    Result,
};

pub use raster::{
    Axis,
    Dimensions,
    ImageCrateReader,
    InterlacedImage,
    RasterReader,
    Region,
};

pub use output::{
    OutputFormat,
    RasterWriter,
    StandardRasterWriter,
    TiffCompression,
};

pub use interlace::{
    InterlaceConfig,
    InterlaceConfigBuilder,
    InterlacePipeline,
    PipelineTimings,
};
