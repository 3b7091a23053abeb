//! Interleaved 8-bit pixel buffers exchanged with the decode/encode layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ResampleError, try_reserve};

/// Channel arrangement of an interleaved 8-bit image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// Single luma channel.
    Gray,
    /// Luma followed by alpha.
    GrayAlpha,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl ChannelLayout {
    /// Number of interleaved samples per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Index of the channel that is stored linearly and skips gamma conversion.
    ///
    /// The position is a fixed convention: the second channel of a two-channel
    /// image and the fourth channel of a four-channel image.
    pub const fn non_color_channel(self) -> Option<usize> {
        match self {
            Self::GrayAlpha => Some(1),
            Self::Rgba => Some(3),
            Self::Gray | Self::Rgb => None,
        }
    }

    /// Whether channel `index` carries gamma-encoded color.
    pub const fn is_color_channel(self, index: usize) -> bool {
        match self.non_color_channel() {
            Some(alpha) => index != alpha,
            None => true,
        }
    }

    /// Same layout with the non-color channel removed.
    pub const fn without_alpha(self) -> Self {
        match self {
            Self::Gray | Self::GrayAlpha => Self::Gray,
            Self::Rgb | Self::Rgba => Self::Rgb,
        }
    }
}

impl TryFrom<u8> for ChannelLayout {
    type Error = ResampleError;

    fn try_from(channels: u8) -> Result<Self, Self::Error> {
        match channels {
            1 => Ok(Self::Gray),
            2 => Ok(Self::GrayAlpha),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            other => Err(ResampleError::UnsupportedChannels(other)),
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gray => write!(f, "gray"),
            Self::GrayAlpha => write!(f, "gray+alpha"),
            Self::Rgb => write!(f, "RGB"),
            Self::Rgba => write!(f, "RGBA"),
        }
    }
}

/// Owned, row-major, interleaved 8-bit image with no row padding.
///
/// `data.len()` is always `width * height * layout.channels()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap decoded samples, checking that the length matches the geometry.
    pub fn from_raw(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        data: Vec<u8>,
    ) -> Result<Self, ResampleError> {
        let expected = sample_count(width, height, layout)?;
        if data.len() != expected {
            return Err(ResampleError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, layout, data })
    }

    /// Allocate a zero-filled buffer, reporting allocation failure instead of aborting.
    pub fn try_zeroed(width: u32, height: u32, layout: ChannelLayout) -> Result<Self, ResampleError> {
        let len = sample_count(width, height, layout)?;
        let mut data = Vec::new();
        try_reserve(&mut data, len)?;
        data.resize(len, 0);
        Ok(Self { width, height, layout, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Samples per row.
    pub fn pitch(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// All samples, interleaved and row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return the raw samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Interleaved samples of row `y`.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.pitch();
        &self.data[start..start + self.pitch()]
    }

    /// Mutable interleaved samples of row `y`.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let pitch = self.pitch();
        let start = y as usize * pitch;
        &mut self.data[start..start + pitch]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.pitch())
    }

    /// All samples of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels();
        let start = x as usize * c;
        &self.row(y)[start..start + c]
    }

    /// A single sample at `(x, y)` in channel `channel`.
    pub fn sample(&self, x: u32, y: u32, channel: usize) -> u8 {
        self.pixel(x, y)[channel]
    }

    /// Copy of the buffer with the non-color channel dropped.
    ///
    /// Returns a plain clone for layouts without one.
    pub fn without_alpha(&self) -> Self {
        let Some(alpha) = self.layout.non_color_channel() else {
            return self.clone();
        };
        let data = self
            .data
            .chunks_exact(self.channels())
            .flat_map(|px| px[..alpha].iter().copied())
            .collect();
        Self {
            width: self.width,
            height: self.height,
            layout: self.layout.without_alpha(),
            data,
        }
    }
}

fn sample_count(width: u32, height: u32, layout: ChannelLayout) -> Result<usize, ResampleError> {
    if width == 0 || height == 0 {
        return Err(ResampleError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(layout.channels()))
        .ok_or(ResampleError::InvalidDimensions { width, height })
}
