//! Output encoding module
//!
//! Writes the interlaced canvas in the format implied by the output path,
//! tagging it with its print resolution where the format allows.

mod writer;
mod standard_writer;
pub mod types;

pub use writer::RasterWriter;
pub use standard_writer::StandardRasterWriter;
pub use types::{MAX_JPEG_PPI, MAX_PNG_PPI, OutputFormat, TiffCompression};
