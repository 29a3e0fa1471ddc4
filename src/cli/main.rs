//! Background transparency CLI tool
//!
//! Command-line interface making the uniform background of one image
//! transparent using the processor.

use super::config::CliConfigBuilder;
use crate::{
    processor::TransparencyProcessor,
    tracing_config::{events, spans},
};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Make the uniform background of an image transparent
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "bg-transparent")]
pub struct Cli {
    /// Input image file (jpg, jpeg, png, bmp, tiff, gif, webp)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Re-encode through a base64 data URI before the transform (true or false)
    #[arg(
        value_name = "ROUND_TRIP",
        default_value = "false",
        value_parser = parse_round_trip_flag,
        action = clap::ArgAction::Set
    )]
    pub round_trip: bool,

    /// Directory receiving out__<stem>.png
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable verbose logging (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse the ROUND_TRIP positional, accepting `true`/`false` in any case
fn parse_round_trip_flag(value: &str) -> std::result::Result<bool, String> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("expected 'true' or 'false', got '{}'", value))
    }
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose).context("Failed to initialize tracing")?;

    match run(&cli) {
        Ok(_) => Ok(()),
        Err(e) => {
            events::error_with_context(&format!("{e:#}"), "bg-transparent");
            Err(e)
        },
    }
}

/// Validate the arguments, process the input and return the written path
pub fn run(cli: &Cli) -> Result<PathBuf> {
    CliConfigBuilder::validate_cli(cli).context("Invalid CLI arguments")?;

    let config = CliConfigBuilder::from_cli(cli).context("Failed to build configuration")?;
    let processor =
        TransparencyProcessor::new(config).context("Failed to create transparency processor")?;

    let _span = spans::file_processing(&cli.input, cli.round_trip).entered();
    debug!(
        input = %cli.input.display(),
        round_trip = cli.round_trip,
        output_dir = %cli.output_dir.display(),
        "Starting background transparency"
    );

    process_single_file(&processor, &cli.input)
}

/// Initialize tracing based on verbosity level
fn init_tracing(verbose_count: u8) -> Result<()> {
    use crate::tracing_config::{TracingConfig, TracingFormat};

    TracingConfig::new()
        .with_verbosity(verbose_count)
        .with_format(TracingFormat::Console)
        .init()
        .context("Failed to initialize tracing subscriber")?;

    debug!(verbosity = verbose_count, "Tracing initialized");
    Ok(())
}

fn process_single_file(processor: &TransparencyProcessor, input_path: &Path) -> Result<PathBuf> {
    let mut result = processor.process_file(input_path).with_context(|| {
        format!(
            "Failed to make background of {} transparent",
            input_path.display()
        )
    })?;

    let output_path = processor.output_path_for(input_path);
    result
        .save_png_timed(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    let timings = result.timings();
    debug!("Processing breakdown for {}:", input_path.display());
    debug!("  ├─ Image Decode: {}ms", timings.image_decode_ms);
    if let Some(round_trip_ms) = timings.round_trip_ms {
        debug!("  ├─ Data URI Round-Trip: {}ms", round_trip_ms);
    }
    debug!("  ├─ Transform: {}ms", timings.transform_ms);
    if let Some(encode_ms) = timings.image_encode_ms {
        debug!("  ├─ Image Encode: {}ms", encode_ms);
    }
    debug!(
        "  └─ Cleared {} pixels ({:.1}%) matching {:?}",
        result.cleared_pixels,
        result.transparent_ratio() * 100.0,
        result.background.0
    );

    info!(
        "Processed: {} -> {} in {:.2}s",
        input_path.display(),
        output_path.display(),
        timings.total_ms as f64 / 1000.0
    );

    Ok(output_path)
}
