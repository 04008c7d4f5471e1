//! Interlacing module
//!
//! Configuration, band planning and the pipeline that turns several source
//! images into one interlaced image.

mod config;
mod pipeline;
pub mod plan;
mod timing;


pub use config::{
    DEFAULT_JPEG_QUALITY, DEFAULT_PPI, DEFAULT_SLICE_THICKNESS, InterlaceConfig,
    InterlaceConfigBuilder,
};
pub use pipeline::{InterlacePipeline, MIN_SOURCES};
pub use plan::{SlicePlacement, band_step, plan_slices};
pub use timing::{PipelineTimings, StepTiming, Timer};
