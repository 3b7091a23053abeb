//! Transfer curves that map gamma-encoded samples to linear light and back.
//!
//! Transfer functions operate on normalized values in `[0, 1]`.

use serde::{Deserialize, Serialize};

use crate::error::ResampleError;

/// Default exponent of the power-law curve.
///
/// Slightly flatter than sRGB's effective ~2.2, which keeps the 8-bit round
/// trip through the inverse table within one code value.
pub const DEFAULT_GAMMA: f32 = 1.75;

/// Curve used to build [`GammaTables`](super::tables::GammaTables).
///
/// Both directions must be inverses of each other on `[0, 1]`.
pub trait TransferFunction: Send + Sync {
    /// Stored sample value to linear light.
    fn to_linear(&self, encoded: f32) -> f32;

    /// Linear light back to a stored sample value.
    fn to_encoded(&self, linear: f32) -> f32;
}

/// Pure power law: `linear = encoded ^ gamma`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerTransfer {
    gamma: f32,
}

impl PowerTransfer {
    pub fn new(gamma: f32) -> Result<Self, ResampleError> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(ResampleError::InvalidGamma(gamma));
        }
        Ok(Self { gamma })
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }
}

impl TransferFunction for PowerTransfer {
    fn to_linear(&self, encoded: f32) -> f32 {
        encoded.max(0.0).powf(self.gamma)
    }

    fn to_encoded(&self, linear: f32) -> f32 {
        linear.max(0.0).powf(1.0 / self.gamma)
    }
}

/// Piecewise sRGB curve (IEC 61966-2-1): a linear toe below
/// encoded 0.04045 and an offset 2.4 power law above it.
#[derive(Debug, Clone, Copy)]
pub struct SrgbTransfer;

/// Encoded value where the linear toe meets the power segment.
const SRGB_TOE_ENCODED: f32 = 0.04045;
/// The same breakpoint in linear light.
const SRGB_TOE_LINEAR: f32 = 0.003_130_8;
const SRGB_TOE_SLOPE: f32 = 12.92;
const SRGB_OFFSET: f32 = 0.055;
const SRGB_EXPONENT: f32 = 2.4;

impl TransferFunction for SrgbTransfer {
    fn to_linear(&self, encoded: f32) -> f32 {
        match encoded {
            v if v <= SRGB_TOE_ENCODED => v / SRGB_TOE_SLOPE,
            v => ((v + SRGB_OFFSET) / (1.0 + SRGB_OFFSET)).powf(SRGB_EXPONENT),
        }
    }

    fn to_encoded(&self, linear: f32) -> f32 {
        match linear {
            l if l <= SRGB_TOE_LINEAR => l * SRGB_TOE_SLOPE,
            l => (1.0 + SRGB_OFFSET) * l.powf(SRGB_EXPONENT.recip()) - SRGB_OFFSET,
        }
    }
}

/// Serializable choice of transfer curve for a resize operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TransferCurve {
    /// Power law with the given exponent.
    Power { gamma: f32 },
    /// Piecewise sRGB curve.
    Srgb,
}

impl TransferCurve {
    /// Resolve to a transfer function, validating parameters.
    pub fn function(self) -> Result<Box<dyn TransferFunction>, ResampleError> {
        match self {
            Self::Power { gamma } => Ok(Box::new(PowerTransfer::new(gamma)?)),
            Self::Srgb => Ok(Box::new(SrgbTransfer)),
        }
    }
}

impl Default for TransferCurve {
    fn default() -> Self {
        Self::Power { gamma: DEFAULT_GAMMA }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;
    const LINEAR_SAMPLES: [f32; 7] = [0.0, 0.001, 0.01, 0.1, 0.5, 0.9, 1.0];

    /// Largest `|linear - to_linear(to_encoded(linear))|` over the sample values.
    fn inverse_error(tf: &dyn TransferFunction) -> f32 {
        LINEAR_SAMPLES
            .iter()
            .map(|&l| (l - tf.to_linear(tf.to_encoded(l))).abs())
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_power_roundtrip_preserves_values() {
        let tf = PowerTransfer::new(DEFAULT_GAMMA).unwrap();
        assert!(inverse_error(&tf) < EPSILON);
    }

    #[test]
    fn test_power_known_values() {
        let tf = PowerTransfer::new(2.0).unwrap();
        assert!((tf.to_linear(0.5) - 0.25).abs() < EPSILON);
        assert!((tf.to_encoded(0.25) - 0.5).abs() < EPSILON);
        assert_eq!(tf.to_linear(-0.5), 0.0);
    }

    #[test]
    fn test_power_rejects_bad_gamma() {
        assert_eq!(PowerTransfer::new(0.0), Err(ResampleError::InvalidGamma(0.0)));
        assert!(PowerTransfer::new(f32::NAN).is_err());
        assert!(PowerTransfer::new(-1.0).is_err());
    }

    #[test]
    fn test_srgb_roundtrip_preserves_values() {
        assert!(inverse_error(&SrgbTransfer) < EPSILON);
    }

    #[test]
    fn test_srgb_known_values() {
        let tf = SrgbTransfer;
        assert!((tf.to_linear(0.0) - 0.0).abs() < EPSILON);
        assert!((tf.to_linear(1.0) - 1.0).abs() < EPSILON);
        // Encoded 0.5 is about 21% linear light.
        assert!((tf.to_linear(0.5) - 0.214041).abs() < 0.001);
    }

    #[test]
    fn test_curve_serde_uses_tagged_kebab_case() {
        let json = serde_json::to_string(&TransferCurve::Power { gamma: 2.2 }).unwrap();
        assert_eq!(json, r#"{"kind":"power","gamma":2.2}"#);
        let srgb: TransferCurve = serde_json::from_str(r#"{"kind":"srgb"}"#).unwrap();
        assert_eq!(srgb, TransferCurve::Srgb);
    }
}
