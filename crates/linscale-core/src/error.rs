use crate::image::ChannelLayout;

/// Errors raised while configuring or running a resize operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    #[error("unsupported channel count: {0} (expected 1 to 4)")]
    UnsupportedChannels(u8),
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("cannot resample an axis of {src_len} samples into {dst_len}")]
    EmptyAxis { src_len: usize, dst_len: usize },
    #[error("pixel buffer holds {actual} samples, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("destination layout {dst} does not match source layout {src}")]
    LayoutMismatch { src: ChannelLayout, dst: ChannelLayout },
    #[error("filter scale must be finite and positive, got {0}")]
    InvalidFilterScale(f32),
    #[error("gamma must be finite and positive, got {0}")]
    InvalidGamma(f32),
    #[error("out of memory allocating {bytes} bytes")]
    Allocation { bytes: usize },
    #[error("received more than {height} source rows")]
    RowOverflow { height: u32 },
    #[error("produced {produced} of {expected} destination rows")]
    Incomplete { produced: u32, expected: u32 },
}

impl From<std::collections::TryReserveError> for ResampleError {
    fn from(_: std::collections::TryReserveError) -> Self {
        // The reserve error carries no byte count on stable.
        Self::Allocation { bytes: 0 }
    }
}

/// Reserve room for `additional` more elements, reporting the size on failure.
pub(crate) fn try_reserve<T>(vec: &mut Vec<T>, additional: usize) -> Result<(), ResampleError> {
    vec.try_reserve_exact(additional)
        .map_err(|_| ResampleError::Allocation {
            bytes: additional.saturating_mul(std::mem::size_of::<T>()),
        })
}
