use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use lenticular_interlace::image_pipeline::interlace::{
    DEFAULT_JPEG_QUALITY, DEFAULT_PPI, DEFAULT_SLICE_THICKNESS,
};
use lenticular_interlace::image_pipeline::{InterlaceConfig, InterlacePipeline, TiffCompression};
use lenticular_interlace::logger;

use tracing::{error, info};

/// Interlace multiple images with specified PPI and slice size.
#[derive(Parser, Debug)]
#[command(name = "interlace", version, about)]
struct Cli {
    /// Paths to the image files (minimum of 2).
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Pixels per inch for the output image.
    #[arg(long, default_value_t = DEFAULT_PPI)]
    ppi: u32,

    /// Slice size in pixels.
    #[arg(long = "slice", default_value_t = DEFAULT_SLICE_THICKNESS)]
    slice: u32,

    /// Use horizontal slicing instead of vertical.
    #[arg(long, default_value_t = false)]
    horz: bool,

    /// Output filename; the extension selects the format.
    #[arg(long, default_value = "interlaced_output.jpg")]
    output: PathBuf,

    /// JPEG quality (1-100), used for .jpg/.jpeg output.
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// TIFF compression (none, lzw, deflate), used for .tif/.tiff output.
    #[arg(long, default_value = "deflate")]
    compression: TiffCompression,

    /// Log how long each pipeline step took.
    #[arg(long, default_value_t = false)]
    timings: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = InterlaceConfig::builder()
        .horizontal(cli.horz)
        .slice_thickness(cli.slice)
        .ppi(cli.ppi)
        .jpeg_quality(cli.quality)
        .tiff_compression(cli.compression)
        .build();
    let pipeline = InterlacePipeline::new(config);

    info!(
        "Interlacing {} images: {:?}, slice {}px, {} ppi",
        cli.images.len(),
        pipeline.config().axis,
        pipeline.config().slice_thickness,
        pipeline.config().ppi
    );

    let timings = pipeline
        .interlace_files_with_timings(cli.images.as_slice(), &cli.output)
        .with_context(|| format!("could not produce {}", cli.output.display()))?;

    if cli.timings {
        timings.log_summary();
    }

    info!("Interlaced image saved as {}", cli.output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(if cli.verbose { "debug" } else { "info" });

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
