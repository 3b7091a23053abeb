use std::path::Path;

use image::{ExtendedColorType, ImageFormat};
use jpeg_encoder::{ColorType, Encoder, SamplingFactor};
use linscale_core::{ChannelLayout, PixelBuffer};

use crate::error::CodecError;

/// Quality used when the caller does not pick one.
pub const DEFAULT_QUALITY: u8 = 90;

/// JPEG component sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsampling {
    /// Single luma component, no chroma at all.
    LumaOnly,
    /// Luma plus chroma, chroma stored at half resolution on both axes.
    Chroma420,
}

/// Settings for writing an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    /// JPEG quality, 0 to 100. Ignored by lossless formats.
    pub quality: u8,
    pub subsampling: Subsampling,
}

impl EncodeParams {
    /// Parameters for an image with `layout`, clamping `quality` into `[0, 100]`.
    ///
    /// Gray and gray+alpha images are written luma-only; color layouts keep
    /// chroma at 4:2:0.
    pub fn for_layout(layout: ChannelLayout, quality: i32) -> Self {
        let clamped = quality.clamp(0, 100);
        if clamped != quality {
            tracing::warn!(quality, clamped, "quality out of range, clamping");
        }
        let subsampling = match layout {
            ChannelLayout::Gray | ChannelLayout::GrayAlpha => Subsampling::LumaOnly,
            ChannelLayout::Rgb | ChannelLayout::Rgba => Subsampling::Chroma420,
        };
        Self {
            quality: clamped as u8,
            subsampling,
        }
    }
}

/// Write `image` to `path`, choosing the container from the file extension.
///
/// JPEG has no alpha, so the non-color channel is dropped for JPEG output.
/// Other formats keep every channel.
pub fn encode(path: &Path, image: &PixelBuffer, params: &EncodeParams) -> Result<(), CodecError> {
    let format = ImageFormat::from_path(path)
        .map_err(|_| CodecError::UnsupportedFormat(path.display().to_string()))?;

    tracing::debug!(
        path = %path.display(),
        ?format,
        width = image.width(),
        height = image.height(),
        layout = %image.layout(),
        quality = params.quality,
        "encoding image"
    );

    match format {
        ImageFormat::Jpeg => encode_jpeg(path, image, params),
        other => image::save_buffer_with_format(
            path,
            image.as_raw(),
            image.width(),
            image.height(),
            color_type(image.layout()),
            other,
        )
        .map_err(CodecError::Encode),
    }
}

fn encode_jpeg(path: &Path, image: &PixelBuffer, params: &EncodeParams) -> Result<(), CodecError> {
    let (width, height) = match (u16::try_from(image.width()), u16::try_from(image.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(CodecError::TooLarge {
                width: image.width(),
                height: image.height(),
            });
        }
    };
    let opaque = image.without_alpha();
    let (color, sampling) = match (opaque.layout(), params.subsampling) {
        (ChannelLayout::Gray, _) => (ColorType::Luma, None),
        (ChannelLayout::Rgb, Subsampling::Chroma420) => (ColorType::Rgb, Some(SamplingFactor::F_2_2)),
        (layout, subsampling) => {
            return Err(CodecError::Subsampling { layout, subsampling });
        }
    };

    // Quality 0 is not a valid JPEG quantizer scale.
    let mut encoder = Encoder::new_file(path, params.quality.max(1)).map_err(CodecError::Jpeg)?;
    if let Some(factor) = sampling {
        encoder.set_sampling_factor(factor);
    }
    encoder
        .encode(opaque.as_raw(), width, height, color)
        .map_err(CodecError::Jpeg)
}

fn color_type(layout: ChannelLayout) -> ExtendedColorType {
    match layout {
        ChannelLayout::Gray => ExtendedColorType::L8,
        ChannelLayout::GrayAlpha => ExtendedColorType::La8,
        ChannelLayout::Rgb => ExtendedColorType::Rgb8,
        ChannelLayout::Rgba => ExtendedColorType::Rgba8,
    }
}
