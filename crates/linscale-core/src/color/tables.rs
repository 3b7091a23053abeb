//! Precomputed lookup tables between 8-bit encoded samples and linear light.
//!
//! Built once per resize operation from a [`TransferFunction`]; nothing is
//! cached across operations.

use crate::color::transfer::{PowerTransfer, TransferFunction};
use crate::error::ResampleError;

/// Resolution of the linear → encoded table.
pub const LINEAR_TABLE_SIZE: usize = 4096;

const MAX_INDEX: f32 = (LINEAR_TABLE_SIZE - 1) as f32;

/// Forward (encoded → linear) and inverse (linear → encoded) tables.
#[derive(Clone)]
pub struct GammaTables {
    encoded_to_linear: [f32; 256],
    linear_to_encoded: Box<[u8; LINEAR_TABLE_SIZE]>,
}

impl GammaTables {
    /// Tables for the power law `linear = encoded ^ gamma`.
    pub fn from_gamma(gamma: f32) -> Result<Self, ResampleError> {
        Ok(Self::from_transfer(&PowerTransfer::new(gamma)?))
    }

    /// Sample an arbitrary transfer function into both tables.
    pub fn from_transfer(tf: &dyn TransferFunction) -> Self {
        let mut encoded_to_linear = [0.0_f32; 256];
        for (i, slot) in encoded_to_linear.iter_mut().enumerate() {
            *slot = tf.to_linear(i as f32 / 255.0);
        }

        let mut linear_to_encoded = Box::new([0_u8; LINEAR_TABLE_SIZE]);
        for (j, slot) in linear_to_encoded.iter_mut().enumerate() {
            *slot = clamp_byte(255.0 * tf.to_encoded(j as f32 / MAX_INDEX));
        }

        tracing::debug!(
            size = LINEAR_TABLE_SIZE,
            mid = encoded_to_linear[128],
            "built gamma lookup tables"
        );

        Self {
            encoded_to_linear,
            linear_to_encoded,
        }
    }

    /// Linear-light value of an encoded sample, in `[0, 1]`.
    #[inline]
    pub fn to_linear(&self, encoded: u8) -> f32 {
        self.encoded_to_linear[encoded as usize]
    }

    /// Nearest encoded sample for a linear value. Out-of-range input is clamped.
    #[inline]
    pub fn to_encoded(&self, linear: f32) -> u8 {
        self.linear_to_encoded[Self::index(linear)]
    }

    /// Table slot for a linear value: `round(value * (N - 1))` clamped to `[0, N - 1]`.
    #[inline]
    pub fn index(linear: f32) -> usize {
        // NaN saturates to 0 in the cast.
        (linear * MAX_INDEX).round().clamp(0.0, MAX_INDEX) as usize
    }

    pub fn encoded_to_linear(&self) -> &[f32; 256] {
        &self.encoded_to_linear
    }

    pub fn linear_to_encoded(&self) -> &[u8; LINEAR_TABLE_SIZE] {
        &self.linear_to_encoded
    }
}

impl std::fmt::Debug for GammaTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GammaTables")
            .field("linear_table_size", &LINEAR_TABLE_SIZE)
            .finish_non_exhaustive()
    }
}

/// Linear (non-gamma) conversion used for the non-color channel.
#[inline]
pub fn unorm_to_f32(sample: u8) -> f32 {
    sample as f32 * (1.0 / 255.0)
}

/// Inverse of [`unorm_to_f32`], rounded and clamped.
#[inline]
pub fn f32_to_unorm(value: f32) -> u8 {
    clamp_byte(255.0 * value)
}

#[inline]
fn clamp_byte(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
