use std::io::Write;
use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info, instrument};

use crate::image_pipeline::{
    common::error::{InterlaceError, Result},
    interlace::{InterlaceConfig, PipelineTimings, plan::plan_slices},
    output::{OutputFormat, RasterWriter, StandardRasterWriter},
    raster::{Dimensions, ImageCrateReader, InterlacedImage, RasterReader, ops},
};

/// Minimum number of sources an interlaced image is built from.
pub const MIN_SOURCES: usize = 2;

pub struct InterlacePipeline<R: RasterReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: InterlaceConfig,
}

impl InterlacePipeline<ImageCrateReader, StandardRasterWriter> {
    pub fn new(config: InterlaceConfig) -> Self {
        Self {
            reader: ImageCrateReader,
            writer: StandardRasterWriter,
            config,
        }
    }
}

fn label_decode_error(err: InterlaceError, label: &str) -> InterlaceError {
    match err {
        InterlaceError::Decode(msg) => InterlaceError::Decode(format!("{}: {}", label, msg)),
        other => other,
    }
}

impl<R: RasterReader, W: RasterWriter> InterlacePipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: InterlaceConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_inputs(&self, count: usize) -> Result<()> {
        self.config.validate()?;

        if count < MIN_SOURCES {
            return Err(InterlaceError::InvalidInput(format!(
                "at least {} images are required for interlacing, got {}",
                MIN_SOURCES, count
            )));
        }

        Ok(())
    }

    /// Interlaces already decoded sources into a white canvas.
    ///
    /// Sources are center-cropped to the smallest width and height among
    /// them; the result has exactly those dimensions and carries the
    /// configured ppi.
    #[instrument(skip(self, sources), fields(sources = sources.len()))]
    pub fn interlace(&self, sources: Vec<RgbaImage>) -> Result<InterlacedImage> {
        self.interlace_timed(sources, &mut PipelineTimings::new())
    }

    fn interlace_timed(
        &self,
        sources: Vec<RgbaImage>,
        timings: &mut PipelineTimings,
    ) -> Result<InterlacedImage> {
        self.validate_inputs(sources.len())?;

        let Some(dims) = Dimensions::common(sources.iter().map(Dimensions::of)) else {
            return Err(InterlaceError::InvalidInput("no source images".to_string()));
        };
        if dims.width == 0 || dims.height == 0 {
            return Err(InterlaceError::InvalidDimensions(dims.width, dims.height));
        }

        debug!(
            width = dims.width,
            height = dims.height,
            "Cropping {} sources to common dimensions",
            sources.len()
        );

        let cropped: Vec<RgbaImage> = timings.measure("crop", || {
            sources
                .into_iter()
                .map(|source| ops::center_crop(source, dims))
                .collect()
        });

        let pixels = timings.measure("slice_composite", || self.composite_slices(&cropped, dims));

        Ok(InterlacedImage {
            pixels,
            ppi: self.config.ppi,
        })
    }

    fn composite_slices(&self, sources: &[RgbaImage], dims: Dimensions) -> RgbaImage {
        let _span = tracing::info_span!(
            "composite_slices",
            axis = ?self.config.axis,
            slice = self.config.slice_thickness
        )
        .entered();

        let plan = plan_slices(
            dims,
            self.config.axis,
            sources.len(),
            self.config.slice_thickness,
        );
        debug!("Compositing {} slices", plan.len());

        let mut canvas = ops::blank_canvas(dims);
        for placement in &plan {
            let slice = ops::resample_region(
                &sources[placement.source_index],
                placement.region,
                placement.target,
                placement.visible,
            );
            ops::composite(&mut canvas, &slice, placement.offset.0, placement.offset.1);
        }
        canvas
    }

    /// Decodes encoded images from memory, interlaces them and encodes the
    /// result to `output`.
    #[instrument(skip(self, inputs, output), fields(inputs = inputs.len()))]
    pub fn interlace_bytes(
        &self,
        inputs: &[&[u8]],
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<()> {
        self.validate_inputs(inputs.len())?;
        format.check_ppi(self.config.ppi)?;

        let mut timings = PipelineTimings::new();
        let sources = timings.measure("decode", || {
            inputs
                .iter()
                .enumerate()
                .map(|(i, data)| {
                    self.reader
                        .decode(data)
                        .map_err(|e| label_decode_error(e, &format!("input #{}", i)))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let image = self.interlace_timed(sources, &mut timings)?;

        timings.measure("encode", || {
            self.writer.write_image(&image, format, output, &self.config)
        })?;

        let dims = image.dimensions();
        info!(
            width = dims.width,
            height = dims.height,
            "Interlacing complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(())
    }

    pub fn interlace_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_paths: &[P],
        output_path: Q,
    ) -> Result<()> {
        self.interlace_files_with_timings(input_paths, output_path)?;
        Ok(())
    }

    /// Reads and interlaces `input_paths`, writing the result to `output_path`.
    ///
    /// The output format is taken from the extension of `output_path` and is
    /// checked, together with the ppi it has to store, before any input is read. The output file is only created once
    /// the interlaced canvas is ready; if encoding fails afterwards, a
    /// partially written file may be left behind.
    #[instrument(skip(self, input_paths, output_path), fields(inputs = input_paths.len()))]
    pub fn interlace_files_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_paths: &[P],
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let output_path = output_path.as_ref();

        self.validate_inputs(input_paths.len())?;
        let format = OutputFormat::from_path(output_path)?;
        format.check_ppi(self.config.ppi)?;

        info!(
            output = %output_path.display(),
            axis = ?self.config.axis,
            slice = self.config.slice_thickness,
            ppi = self.config.ppi,
            "Interlacing {} images",
            input_paths.len()
        );

        let mut timings = PipelineTimings::new();
        let mut sources = Vec::with_capacity(input_paths.len());
        for path in input_paths {
            let path = path.as_ref();

            let data = timings
                .measure("read_input", || std::fs::read(path))
                .map_err(|e| InterlaceError::Decode(format!("{}: {}", path.display(), e)))?;

            let image = timings
                .measure("decode", || self.reader.decode(&data))
                .map_err(|e| label_decode_error(e, &path.display().to_string()))?;

            debug!(
                "Loaded {}: {}x{}",
                path.display(),
                image.width(),
                image.height()
            );
            sources.push(image);
        }

        let image = self.interlace_timed(sources, &mut timings)?;

        let mut output_file = timings
            .measure("create_output", || std::fs::File::create(output_path))
            .map_err(|e| InterlaceError::Encode(format!("{}: {}", output_path.display(), e)))?;

        timings.measure("encode", || {
            self.writer
                .write_image(&image, format, &mut output_file, &self.config)
        })?;

        let dims = image.dimensions();
        info!(
            width = dims.width,
            height = dims.height,
            "Interlacing complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(timings)
    }

    pub fn config(&self) -> &InterlaceConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InterlaceConfig) {
        self.config = config;
    }
}
