//! File decode/encode collaborators for linscale, built on the `image` crate.
//!
//! Decoding yields an interleaved 8-bit [`PixelBuffer`] in the file's native
//! channel layout; encoding writes one back out, picking the container from
//! the destination extension.
//!
//! [`PixelBuffer`]: linscale_core::PixelBuffer

mod decode;
mod encode;
mod error;

pub use decode::decode;
pub use encode::{EncodeParams, Subsampling, encode, DEFAULT_QUALITY};
pub use error::CodecError;
