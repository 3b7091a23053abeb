//! Parameters that define a single resize operation.

use serde::{Deserialize, Serialize};

use crate::color::tables::GammaTables;
use crate::color::transfer::TransferCurve;
use crate::error::ResampleError;
use crate::resample::filter::FilterKind;

/// Everything the resampler needs besides the pixels and target size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleConfig {
    /// Curve used to linearize color channels. Default: power law, gamma 1.75.
    pub transfer: TransferCurve,
    /// Kernel for both passes. Default: Lanczos4.
    pub filter: FilterKind,
    /// Kernel width multiplier. Above 1.0 is softer with less aliasing,
    /// below 1.0 is sharper with more aliasing. Default: 1.0.
    pub filter_scale: f32,
}

impl ResampleConfig {
    /// Check parameters without building anything expensive.
    pub fn validate(&self) -> Result<(), ResampleError> {
        if !self.filter_scale.is_finite() || self.filter_scale <= 0.0 {
            return Err(ResampleError::InvalidFilterScale(self.filter_scale));
        }
        self.transfer.function().map(|_| ())
    }

    /// Lookup tables for this configuration's transfer curve.
    pub fn gamma_tables(&self) -> Result<GammaTables, ResampleError> {
        Ok(GammaTables::from_transfer(self.transfer.function()?.as_ref()))
    }
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            transfer: TransferCurve::default(),
            filter: FilterKind::default(),
            filter_scale: 1.0,
        }
    }
}
