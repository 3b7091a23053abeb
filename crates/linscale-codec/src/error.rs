use linscale_core::{ChannelLayout, ResampleError};

use crate::encode::Subsampling;

/// Errors from reading or writing image files.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("decoded image is unusable: {0}")]
    Layout(#[from] ResampleError),
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("failed to encode JPEG: {0}")]
    Jpeg(#[source] jpeg_encoder::EncodingError),
    #[error("{width}x{height} exceeds the 65535 pixel JPEG limit")]
    TooLarge { width: u32, height: u32 },
    #[error("cannot write {layout} image with {subsampling:?} sampling")]
    Subsampling {
        layout: ChannelLayout,
        subsampling: Subsampling,
    },
    #[error("unsupported output format for {0}")]
    UnsupportedFormat(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Whether the failure happened while reading the source.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Layout(_))
    }
}
