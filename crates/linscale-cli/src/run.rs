//! The two operation entry points and their outcome mapping.

use std::time::Instant;

use linscale_codec::{CodecError, EncodeParams, decode, encode};
use linscale_core::{PixelBuffer, ResampleError, resample};

use crate::cli::{CompressArgs, OutputArgs, ResizeArgs};
use crate::config::{ConfigError, resolve_target};

/// Process exit code for invalid usage or configuration (`EX_USAGE`).
pub const EXIT_USAGE: u8 = 64;

/// Why an operation failed. Each variant maps to a fixed exit code.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Decode(CodecError),
    #[error("resample failed: {0}")]
    Resample(#[from] ResampleError),
    #[error(transparent)]
    Encode(CodecError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Decode(_) => 1,
            Self::Encode(_) => 2,
            Self::Resample(_) => 3,
            Self::Config(_) => EXIT_USAGE,
        }
    }
}

/// Decode and re-encode without touching the pixels.
pub fn compress(args: &CompressArgs) -> Result<(), RunError> {
    let image = decode(&args.io.input).map_err(RunError::Decode)?;
    write_output(&args.io, &image)?;
    tracing::info!(
        input = %args.io.input.display(),
        output = %args.io.output.display(),
        width = image.width(),
        height = image.height(),
        "compressed"
    );
    Ok(())
}

/// Decode, resample to the requested size, and re-encode.
pub fn resize(args: &ResizeArgs) -> Result<(), RunError> {
    let config = args.filter.resolve()?;
    let image = decode(&args.io.input).map_err(RunError::Decode)?;
    let (width, height) = resolve_target(image.width(), image.height(), args.width, args.height)?;

    let started = Instant::now();
    let resized = resample(&image, width, height, &config)?;
    tracing::info!(
        input = %args.io.input.display(),
        from = %format!("{}x{}", image.width(), image.height()),
        to = %format!("{width}x{height}"),
        layout = %image.layout(),
        filter = %config.filter,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "resampled"
    );
    drop(image);

    write_output(&args.io, &resized)?;
    tracing::info!(output = %args.io.output.display(), "resized");
    Ok(())
}

fn write_output(io: &OutputArgs, image: &PixelBuffer) -> Result<(), RunError> {
    let params = EncodeParams::for_layout(image.layout(), io.quality);
    encode(&io.output, image, &params).map_err(RunError::Encode)
}
