use std::path::Path;

use image::GenericImageView;
use linscale_core::{ChannelLayout, PixelBuffer};

use crate::error::CodecError;

/// Decode an image file into 8-bit interleaved samples.
///
/// Keeps the file's channel arrangement (luma, luma+alpha, RGB or RGBA);
/// deeper bit depths are reduced to 8 bits per sample.
pub fn decode(path: &Path) -> Result<PixelBuffer, CodecError> {
    let img = image::open(path).map_err(CodecError::Decode)?;
    let (width, height) = img.dimensions();
    let color = img.color();

    let (layout, data) = match (color.has_color(), color.has_alpha()) {
        (false, false) => (ChannelLayout::Gray, img.into_luma8().into_raw()),
        (false, true) => (ChannelLayout::GrayAlpha, img.into_luma_alpha8().into_raw()),
        (true, false) => (ChannelLayout::Rgb, img.into_rgb8().into_raw()),
        (true, true) => (ChannelLayout::Rgba, img.into_rgba8().into_raw()),
    };

    tracing::debug!(
        path = %path.display(),
        width,
        height,
        %layout,
        source = ?color,
        "decoded image"
    );
    Ok(PixelBuffer::from_raw(width, height, layout, data)?)
}
