//! Lenticular interlacing: builds one print-ready image from alternating
//! strips of two or more source images.

pub mod image_pipeline;
pub mod logger;
