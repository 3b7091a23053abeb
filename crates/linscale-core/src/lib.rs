//! linscale core: gamma-correct separable image resampling.
//!
//! Decoded 8-bit samples are converted to linear light through lookup
//! tables, filtered horizontally then vertically with a shared pair of
//! contributor lists, and converted back. No file I/O lives here.

pub mod color;
pub mod config;
pub mod error;
pub mod image;
pub mod resample;

// Re-exports for convenience.
pub use color::tables::GammaTables;
pub use color::transfer::{DEFAULT_GAMMA, TransferCurve, TransferFunction};
pub use config::ResampleConfig;
pub use error::ResampleError;
pub use image::{ChannelLayout, PixelBuffer};
pub use resample::channel::{ChannelResampler, ResamplerState};
pub use resample::contributors::{Contributor, ContributorList};
pub use resample::filter::{FilterKind, UnknownFilter};
pub use resample::pipeline::{resample, resample_into};
