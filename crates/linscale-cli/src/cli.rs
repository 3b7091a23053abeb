//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use linscale_codec::DEFAULT_QUALITY;
use linscale_core::FilterKind;

#[derive(Parser, Debug)]
#[command(name = "linscale", version)]
#[command(about = "Re-encode or resize images with gamma-correct resampling")]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode and re-encode without resizing.
    Compress(CompressArgs),
    /// Decode, resample to a new size, and re-encode.
    Resize(ResizeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Source image.
    pub input: PathBuf,
    /// Destination image; the extension picks the format.
    pub output: PathBuf,
    /// JPEG quality, clamped to 0..=100.
    #[arg(short, long, default_value_t = DEFAULT_QUALITY as i32, allow_negative_numbers = true)]
    pub quality: i32,
}

#[derive(Args, Debug, Clone)]
pub struct CompressArgs {
    #[command(flatten)]
    pub io: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ResizeArgs {
    #[command(flatten)]
    pub io: OutputArgs,
    /// Target width; 0 keeps the aspect ratio from --height.
    #[arg(short = 'W', long, default_value_t = 0)]
    pub width: u32,
    /// Target height; 0 keeps the aspect ratio from --width.
    #[arg(short = 'H', long, default_value_t = 0)]
    pub height: u32,
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Resampling overrides, layered over an optional JSON config file.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// JSON file with resample settings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Power-law gamma for color channels.
    #[arg(long, env = "LINSCALE_GAMMA")]
    pub gamma: Option<f32>,
    /// Use the piecewise sRGB curve instead of a power law.
    #[arg(long, conflicts_with = "gamma")]
    pub srgb: bool,
    /// Resampling kernel.
    #[arg(long, env = "LINSCALE_FILTER")]
    pub filter: Option<FilterKind>,
    /// Kernel width multiplier (>1 softer, <1 sharper).
    #[arg(long, env = "LINSCALE_FILTER_SCALE")]
    pub filter_scale: Option<f32>,
}
